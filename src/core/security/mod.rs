//! Security gates for the PQC runtime.


pub use self_test::{KnownAnswerTests, SelfTestRunner};
