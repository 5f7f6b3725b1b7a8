use crate::event::{Event, EventType, PITCH_LENGTH, PITCH_WIDTH, Point};
use crate::event_filter::EventFilter;
use crate::player_summary::FINAL_THIRD_MIN_X;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub const RIGHT_FLANK: Zone = Zone {
    name: "Right flank",
    x: 0.0,
    y: 0.0,
    width: PITCH_LENGTH,
    height: PITCH_WIDTH / 2.0,
};

pub const FINAL_THIRD: Zone = Zone {
    name: "Final third",
    x: FINAL_THIRD_MIN_X,
    y: 0.0,
    width: PITCH_LENGTH - FINAL_THIRD_MIN_X,
    height: PITCH_WIDTH,
};

pub const KEY_ZONES: [Zone; 2] = [RIGHT_FLANK, FINAL_THIRD];

/// One of the target player's actions with its extracted coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionPoint {
    pub event: Event,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl ActionPoint {
    fn from_event(event: &Event) -> Self {
        let (x, y) = event.location.xy();
        Self {
            event: event.clone(),
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TargetActions {
    pub passes: Vec<ActionPoint>,
    pub shots: Vec<ActionPoint>,
    pub carries: Vec<ActionPoint>,
}

impl TargetActions {
    pub fn collect(events: &[Event], marker: &str) -> Self {
        let mut out = TargetActions::default();
        for event in EventFilter::player(marker).apply(events) {
            let bucket = match event.kind {
                EventType::Pass => &mut out.passes,
                EventType::Shot => &mut out.shots,
                EventType::Carry => &mut out.carries,
                _ => continue,
            };
            bucket.push(ActionPoint::from_event(event));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty() && self.shots.is_empty() && self.carries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passes.len() + self.shots.len() + self.carries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PitchLayers {
    pub carry_arrows: Vec<Segment>,
    pub pass_lines: Vec<Segment>,
    pub shot_points: Vec<Point>,
}

impl PitchLayers {
    pub fn build(actions: &TargetActions) -> Self {
        let carry_arrows = actions
            .carries
            .iter()
            .filter_map(|a| segment_of(&a.event))
            .collect();

        let pass_lines = actions
            .passes
            .iter()
            .filter(|a| a.x.is_some_and(|x| x >= FINAL_THIRD_MIN_X))
            .filter_map(|a| segment_of(&a.event))
            .collect();

        let shot_points = actions
            .shots
            .iter()
            .filter_map(|a| match (a.x, a.y) {
                (Some(x), Some(y)) => Some(Point { x, y }),
                _ => None,
            })
            .collect();

        Self {
            carry_arrows,
            pass_lines,
            shot_points,
        }
    }
}

fn segment_of(event: &Event) -> Option<Segment> {
    Some(Segment {
        start: event.location.point()?,
        end: event.end_location.point()?,
    })
}
