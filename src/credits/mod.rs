pub mod rules;

pub use rules::CreditRules;
