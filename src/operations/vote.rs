//! Vote operation.

use std::any::Any;

use serde_json::{Map, Value};

use crate::operations::base::{BaseOperation, Operation};

/// Wire discriminant.
pub const NAME: &str = "vote";

/// Full voting power in the integer weight domain.
pub const FULL_WEIGHT: i64 = 10_000;

/// Up or down vote on a post or comment.
///
/// Weights in `(0, 1]` (by magnitude) are read as fractions of a full vote;
/// anything else is taken as already being in the `-10000..=10000` domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    base: BaseOperation,
}

impl Vote {
    pub fn new() -> Self {
        Self::from_parameters(Map::new())
    }

    pub fn from_parameters(parameters: Map<String, Value>) -> Self {
        Self {
            base: BaseOperation::new(NAME, parameters),
        }
    }

    pub fn voter(&mut self, voter: &str) -> &mut Self {
        self.base.set_parameter("voter", voter);
        self
    }

    /// Alias of [`Vote::voter`].
    pub fn account(&mut self, account: &str) -> &mut Self {
        self.voter(account)
    }

    pub fn author(&mut self, author: &str) -> &mut Self {
        self.base.set_parameter("author", author);
        self
    }

    pub fn perm_link(&mut self, perm_link: &str) -> &mut Self {
        self.base.set_parameter("permlink", perm_link);
        self
    }

    /// Target post: author and permlink at once.
    pub fn on(&mut self, author: &str, perm_link: &str) -> &mut Self {
        self.author(author).perm_link(perm_link)
    }

    pub fn up_vote(&mut self, weight: impl Into<f64>) -> &mut Self {
        self.weight(weight.into().abs())
    }

    pub fn down_vote(&mut self, weight: impl Into<f64>) -> &mut Self {
        self.weight(-weight.into().abs())
    }

    pub fn weight(&mut self, weight: impl Into<f64>) -> &mut Self {
        let weight = weight.into();
        let scaled = if weight.abs() > 0.0 && weight.abs() <= 1.0 {
            weight * FULL_WEIGHT as f64
        } else {
            weight
        };

        self.base.set_parameter("weight", scaled.round() as i64);
        self
    }

    /// Alias of [`Vote::weight`].
    pub fn percent(&mut self, percent: impl Into<f64>) -> &mut Self {
        self.weight(percent)
    }

    /// Stored weight, if set and integral.
    pub fn current_weight(&self) -> Option<i64> {
        self.base.parameter("weight").and_then(Value::as_i64)
    }

    pub fn base_mut(&mut self) -> &mut BaseOperation {
        &mut self.base
    }
}

impl Default for Vote {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for Vote {
    fn base(&self) -> &BaseOperation {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
