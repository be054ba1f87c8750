//! Event template definitions.
//!
//! Templates are static data. The text fields are opaque to the engine;
//! only `effect` influences game state.

use serde::{Deserialize, Serialize};

/// Tile movement applied when a player accepts an event's consequence.
///
/// Magnitudes are unsigned; the sign comes from the variant. `None` means
/// the event has no consequence at all, which is distinct from a
/// zero-magnitude `Bonus(0)` or `Penalty(0)`.
///
/// On the wire a zero field reads as absent, so zero magnitudes are only
/// built in code. They serialize without the zero field: `Penalty(0)`
/// reloads as `None` and `Combined { bonus: 2, penalty: 0 }` as `Bonus(2)`.
/// The net movement is unchanged either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementEffect {
    #[default]
    None,
    /// Move forward.
    Bonus(u32),
    /// Move back.
    Penalty(u32),
    /// Forward and backward parts on the same template. Applied additively.
    Combined { bonus: u32, penalty: u32 },
}

impl MovementEffect {
    /// Build from loosely-typed optional fields.
    ///
    /// A zero or absent field counts as missing. Net movement is the
    /// literal signed sum of both fields, so a negative bonus moves back and
    /// a positive penalty moves forward. Magnitudes beyond `u32::MAX`
    /// saturate.
    #[must_use]
    pub fn from_parts(bonus: Option<i64>, penalty: Option<i64>) -> Self {
        if bonus.is_some_and(|b| b < 0) || penalty.is_some_and(|p| p > 0) {
            log::warn!("event field out of range: bonus {:?}, penalty {:?}", bonus, penalty);
        }

        let (mut forward, mut back) = (0u64, 0u64);
        for value in [bonus, penalty].into_iter().flatten() {
            if value > 0 {
                forward = forward.saturating_add(value.unsigned_abs());
            } else {
                back = back.saturating_add(value.unsigned_abs());
            }
        }

        let bonus = Some(saturate(forward)).filter(|&b| b > 0);
        let penalty = Some(saturate(back)).filter(|&p| p > 0);

        match (bonus, penalty) {
            (None, None) => MovementEffect::None,
            (Some(b), None) => MovementEffect::Bonus(b),
            (None, Some(p)) => MovementEffect::Penalty(p),
            (Some(bonus), Some(penalty)) => MovementEffect::Combined { bonus, penalty },
        }
    }

    /// Whether accepting this effect can move the player.
    #[must_use]
    pub fn has_consequence(self) -> bool {
        self != MovementEffect::None
    }

    /// Net signed movement: `bonus + penalty` with penalty negative.
    #[must_use]
    pub fn delta(self) -> i64 {
        match self {
            MovementEffect::None => 0,
            MovementEffect::Bonus(b) => i64::from(b),
            MovementEffect::Penalty(p) => -i64::from(p),
            MovementEffect::Combined { bonus, penalty } => i64::from(bonus) - i64::from(penalty),
        }
    }

    /// Forward component, if any.
    #[must_use]
    pub fn bonus(self) -> Option<u32> {
        match self {
            MovementEffect::Bonus(b) | MovementEffect::Combined { bonus: b, .. } => Some(b),
            _ => None,
        }
    }

    /// Backward component as a non-positive number, if any.
    #[must_use]
    pub fn penalty(self) -> Option<i64> {
        match self {
            MovementEffect::Penalty(p) | MovementEffect::Combined { penalty: p, .. } => {
                Some(-i64::from(p))
            }
            _ => None,
        }
    }
}

fn saturate(steps: u64) -> u32 {
    u32::try_from(steps).unwrap_or_else(|_| {
        log::warn!("event movement {} saturated", steps);
        u32::MAX
    })
}

/// One possible occurrence on a tile category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEventTemplate", into = "RawEventTemplate")]
pub struct EventTemplate {
    /// The dare, question or happening read out to the table.
    pub text: String,
    pub effect: MovementEffect,
    /// Short description of the consequence ("Miss it: -3").
    pub action_text: Option<String>,
    /// Answer for quiz events.
    pub answer: Option<String>,
    /// Seconds the player has to respond, for timed events.
    pub timer_secs: Option<u32>,
}

impl EventTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            effect: MovementEffect::None,
            action_text: None,
            answer: None,
            timer_secs: None,
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: MovementEffect) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn bonus(self, steps: u32) -> Self {
        self.with_effect(MovementEffect::Bonus(steps))
    }

    #[must_use]
    pub fn penalty(self, steps: u32) -> Self {
        self.with_effect(MovementEffect::Penalty(steps))
    }

    #[must_use]
    pub fn action(mut self, text: impl Into<String>) -> Self {
        self.action_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    #[must_use]
    pub fn timed(mut self, secs: u32) -> Self {
        self.timer_secs = Some(secs);
        self
    }
}

/// Wire shape of a template: loose optional numeric fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawEventTemplate {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bonus: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    penalty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timer: Option<u32>,
}

impl From<RawEventTemplate> for EventTemplate {
    fn from(raw: RawEventTemplate) -> Self {
        Self {
            text: raw.text,
            effect: MovementEffect::from_parts(raw.bonus, raw.penalty),
            action_text: raw.action_text,
            answer: raw.answer,
            timer_secs: raw.timer,
        }
    }
}

impl From<EventTemplate> for RawEventTemplate {
    fn from(template: EventTemplate) -> Self {
        Self {
            text: template.text,
            bonus: template.effect.bonus().filter(|&b| b > 0).map(i64::from),
            penalty: template.effect.penalty().filter(|&p| p < 0),
            action_text: template.action_text,
            answer: template.answer,
            timer: template.timer_secs,
        }
    }
}
