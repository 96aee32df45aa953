pub mod address;
pub mod document;
pub mod publish;
pub mod sdk;
pub mod timefmt;
pub mod wallet;
