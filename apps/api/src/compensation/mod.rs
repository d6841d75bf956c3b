// Compensation engine: positioning, employer overlays, negotiation scripts, advice.
// The pure modules (distribution, positioning, company, script, advice copy) never
// touch the database; `store` is the only module that queries it.

pub mod advice;
pub mod company;
pub mod comparison;
pub mod distribution;
pub mod format;
pub mod handlers;
pub mod positioning;
pub mod prompts;
pub mod recommendation;
pub mod script;
pub mod store;
