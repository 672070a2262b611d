//! Payout and reward options attached to a comment.

use std::any::Any;

use serde_json::{Map, Value};

use crate::operations::base::{BaseOperation, Operation};
use crate::operations::comment::Comment;

/// Wire discriminant.
pub const NAME: &str = "comment_options";

#[derive(Debug, Clone, PartialEq)]
pub struct CommentOptions {
    base: BaseOperation,
}

impl CommentOptions {
    pub fn new() -> Self {
        Self::from_parameters(Map::new())
    }

    pub fn from_parameters(parameters: Map<String, Value>) -> Self {
        Self {
            base: BaseOperation::new(NAME, parameters),
        }
    }

    /// Target the given comment, copying whichever of author/permlink it has.
    pub fn of(&mut self, comment: &Comment) -> &mut Self {
        for key in ["author", "permlink"] {
            if let Some(value) = comment.parameters().get(key) {
                self.base.set_parameter(key, value.clone());
            }
        }
        self
    }

    pub fn author(&mut self, author: &str) -> &mut Self {
        self.base.set_parameter("author", author);
        self
    }

    pub fn perm_link(&mut self, perm_link: &str) -> &mut Self {
        self.base.set_parameter("permlink", perm_link);
        self
    }

    /// Stored as an asset string, e.g. `10` becomes `"10.000 SBD"`.
    pub fn max_accepted_payout(&mut self, amount: f64) -> &mut Self {
        self.base
            .set_parameter("max_accepted_payout", format!("{amount:.3} SBD"));
        self
    }

    /// Share of the payout taken in SBD, in basis points.
    pub fn percent_steem_dollars(&mut self, percent: impl Into<Value>) -> &mut Self {
        self.base.set_parameter("percent_steem_dollars", percent);
        self
    }

    pub fn allow_votes(&mut self, allow: bool) -> &mut Self {
        self.base.set_parameter("allow_votes", allow);
        self
    }

    pub fn allow_curation_rewards(&mut self, allow: bool) -> &mut Self {
        self.base.set_parameter("allow_curation_rewards", allow);
        self
    }

    pub fn base_mut(&mut self) -> &mut BaseOperation {
        &mut self.base
    }
}

impl Default for CommentOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for CommentOptions {
    fn base(&self) -> &BaseOperation {
        &self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
