use super::EventSink;
use miasma_data::Point;
use serde::Serialize;

/// Something the field engine reported to the outside world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Event {
    Sound {
        at: Point,
        radius: i32,
        description: String,
    },
    Message(String),
    Explosion {
        at: Point,
        power: i32,
        fire: bool,
    },
}

/// Records every event in order. Scent clearing is only counted.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
    scent_cleared: usize,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            Event::Message(text) => Some(text.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn explosions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Explosion { .. }))
            .count()
    }

    #[must_use]
    pub fn scent_cleared(&self) -> usize {
        self.scent_cleared
    }

    /// Hands over everything recorded so far.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn sound(&mut self, p: Point, radius: i32, description: &str) {
        tracing::trace!(x = p.x, y = p.y, radius, description, "Sound");
        self.events.push(Event::Sound {
            at: p,
            radius,
            description: description.to_string(),
        });
    }

    fn message(&mut self, text: &str) {
        self.events.push(Event::Message(text.to_string()));
    }

    fn explosion(&mut self, p: Point, power: i32, fire: bool) {
        tracing::debug!(x = p.x, y = p.y, power, fire, "Explosion");
        self.events.push(Event::Explosion { at: p, power, fire });
    }

    fn clear_scent(&mut self, _p: Point) {
        self.scent_cleared += 1;
    }
}
