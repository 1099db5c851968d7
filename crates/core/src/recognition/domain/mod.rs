pub mod embedding_provider;
pub mod identity_matcher;
pub mod whitelist;
