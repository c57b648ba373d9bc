pub mod advisory_text;
pub mod alerts;
pub mod resolver;
pub mod rules;

pub use resolver::{Resolver, RuleTable};
pub use rules::RiskEngine;
