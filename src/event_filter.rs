use crate::event::{Event, EventType};

/// Predicate over events: a player-name substring and/or an exact action type.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub player: Option<String>,
    pub kind: Option<EventType>,
}

impl EventFilter {
    pub fn player(marker: impl Into<String>) -> Self {
        Self {
            player: Some(marker.into()),
            kind: None,
        }
    }

    pub fn of_kind(mut self, kind: EventType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        if let Some(marker) = self.player.as_deref() {
            // Case-sensitive containment; events without a player never match.
            let Some(name) = event.player.as_deref() else {
                return false;
            };
            if !name.contains(marker) {
                return false;
            }
        }
        if let Some(kind) = self.kind.as_ref() {
            if &event.kind != kind {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

pub fn filter_events<'a>(
    events: &'a [Event],
    player: &str,
    kind: Option<EventType>,
) -> Vec<&'a Event> {
    EventFilter {
        player: Some(player.to_string()),
        kind,
    }
    .apply(events)
}
