/*!
Initialization options for the PQC runtime.

Options select the mutex strategy and whether the self-test gate must
pass before the runtime is usable. They can be built programmatically or
parsed from a space-separated argument string such as
`"thread_safe fips140"`.
*/

use std::str::FromStr;

use crate::core::error::{config_err, Error, Result};

/// Options recognized by [`LibraryState::initialize`](crate::core::state::LibraryState::initialize)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializerOptions {
    thread_safe: bool,
    fips_mode: bool,
    self_test: bool,
}

impl Default for InitializerOptions {
    fn default() -> Self {
        InitializerOptions {
            thread_safe: true,
            fips_mode: false,
            self_test: false,
        }
    }
}

impl InitializerOptions {
    /// Default options: thread-safe, no mandatory self-tests
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the thread-safe or single-threaded mutex strategy
    pub fn thread_safe(mut self, enabled: bool) -> Self {
        self.thread_safe = enabled;
        self
    }

    /// Enable strict FIPS mode; self-tests must pass at initialization
    pub fn fips_mode(mut self, enabled: bool) -> Self {
        self.fips_mode = enabled;
        self
    }

    /// Force the self-test battery even outside FIPS mode
    pub fn self_test(mut self, enabled: bool) -> Self {
        self.self_test = enabled;
        self
    }

    /// Whether the thread-safe mutex strategy was requested
    pub fn is_thread_safe(&self) -> bool {
        self.thread_safe
    }

    /// Whether strict FIPS mode was requested
    pub fn is_fips_mode(&self) -> bool {
        self.fips_mode
    }

    /// Whether an explicit self-test run was requested
    pub fn self_test_requested(&self) -> bool {
        self.self_test
    }

    /// Whether initialization must run the self-test battery
    pub fn requires_self_tests(&self) -> bool {
        self.fips_mode || self.self_test
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => config_err(format!("expected 'true' or 'false', got '{other}'")),
    }
}

impl FromStr for InitializerOptions {
    type Err = Error;

    /// Parse space-separated flags: `thread_safe`, `fips140`, `selftest`,
    /// each optionally written `flag=true` or `flag=false`
    fn from_str(s: &str) -> Result<Self> {
        let mut options = InitializerOptions::default();

        for token in s.split_whitespace() {
            let (name, value) = match token.split_once('=') {
                Some((name, value)) => (name, parse_flag(value)?),
                None => (token, true),
            };

            match name {
                "thread_safe" => options.thread_safe = value,
                "fips140" => options.fips_mode = value,
                "selftest" => options.self_test = value,
                other => {
                    return config_err(format!("unrecognized initializer argument '{other}'"));
                }
            }
        }

        Ok(options)
    }
}
