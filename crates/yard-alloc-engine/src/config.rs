// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::engine::YardEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many times a transaction that lost a uniqueness race is re-run
    /// before the conflict is reported to the caller.
    pub max_conflict_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: 3,
        }
    }
}

impl EngineConfig {
    /// Total attempts a transaction gets, the first run included.
    #[inline]
    pub fn max_attempts(&self) -> u32 {
        self.max_conflict_retries.saturating_add(1)
    }

    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}

/// Builder for `EngineConfig`.
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn max_conflict_retries(mut self, v: u32) -> Self {
        self.config.max_conflict_retries = v;
        self
    }

    #[inline]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.max_attempts(), 4);
    }

    #[test]
    fn test_zero_retries_still_runs_once() {
        let cfg = EngineConfig {
            max_conflict_retries: 0,
        };
        assert_eq!(cfg.max_attempts(), 1);
    }

    #[test]
    fn test_builder_overrides_defaults() {
        let cfg = EngineConfig::builder().max_conflict_retries(7).build();
        assert_eq!(cfg.max_conflict_retries, 7);
        assert_eq!(EngineConfigBuilder::new().build(), EngineConfig::default());
    }

    #[test]
    fn test_partial_json_keeps_given_fields() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"max_conflict_retries":1}"#).unwrap();
        assert_eq!(cfg.max_attempts(), 2);
    }
}
