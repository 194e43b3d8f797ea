// Two security tiers: public (no auth) and protected (Bearer token on the
// /account surface).
pub mod public;
pub mod protected;
