use dioxus::prelude::*;

/// Shared "what is playing" state: the ordered song ids and the active one.
#[derive(Clone, Copy)]
pub struct PlayerQueue {
    ids: Signal<Vec<String>>,
    active_id: Signal<Option<String>>,
}

impl PlayerQueue {
    pub fn new(ids: Signal<Vec<String>>, active_id: Signal<Option<String>>) -> Self {
        Self { ids, active_id }
    }

    pub fn active_id(&self) -> Option<String> {
        (self.active_id)()
    }

    pub fn set_id(&self, id: String) {
        let mut active_id = self.active_id;
        active_id.set(Some(id));
    }

    pub fn set_ids(&self, ids: Vec<String>) {
        let mut queue = self.ids;
        queue.set(ids);
    }

    pub fn play_next(&self) {
        let next = next_id(&self.ids.peek(), self.active_id.peek().as_deref());
        if let Some(id) = next {
            self.set_id(id);
        }
    }

    pub fn play_previous(&self) {
        let previous = previous_id(&self.ids.peek(), self.active_id.peek().as_deref());
        if let Some(id) = previous {
            self.set_id(id);
        }
    }
}

/// The id after `active`, wrapping to the first. An unknown `active` starts from the top.
pub fn next_id(ids: &[String], active: Option<&str>) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let next = match position(ids, active) {
        Some(idx) if idx + 1 < ids.len() => idx + 1,
        _ => 0,
    };
    ids.get(next).cloned()
}

/// The id before `active`, wrapping to the last.
pub fn previous_id(ids: &[String], active: Option<&str>) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let previous = match position(ids, active) {
        Some(idx) if idx > 0 => idx - 1,
        _ => ids.len() - 1,
    };
    ids.get(previous).cloned()
}

fn position(ids: &[String], active: Option<&str>) -> Option<usize> {
    let active = active?;
    ids.iter().position(|id| id == active)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<String> {
        ["a", "b", "c"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn next_advances_and_wraps() {
        assert_eq!(next_id(&ids(), Some("a")).as_deref(), Some("b"));
        assert_eq!(next_id(&ids(), Some("c")).as_deref(), Some("a"));
    }

    #[test]
    fn previous_steps_back_and_wraps() {
        assert_eq!(previous_id(&ids(), Some("b")).as_deref(), Some("a"));
        assert_eq!(previous_id(&ids(), Some("a")).as_deref(), Some("c"));
    }

    #[test]
    fn unknown_active_id() {
        assert_eq!(next_id(&ids(), Some("zzz")).as_deref(), Some("a"));
        assert_eq!(previous_id(&ids(), None).as_deref(), Some("c"));
    }

    #[test]
    fn empty_queue_has_no_neighbours() {
        assert_eq!(next_id(&[], Some("a")), None);
        assert_eq!(previous_id(&[], Some("a")), None);
    }
}
