// Fri Oct 16 2026 - Alex

use crate::pattern::{signature, PatternError, PatternMatcher, ScanHit};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A signature as it appears in configuration: a name and its IDA-style text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSignature {
    pub name: String,
    pub signature: String,
}

impl NamedSignature {
    pub fn new(name: &str, signature: &str) -> Self {
        Self {
            name: name.to_string(),
            signature: signature.to_string(),
        }
    }

    /// Parses the `NAME=SIGNATURE` form used on the command line.
    pub fn parse(spec: &str) -> Result<Self, PatternError> {
        let (name, sig) = spec
            .split_once('=')
            .ok_or_else(|| PatternError::malformed(0, format!("expected NAME=SIGNATURE, got '{}'", spec)))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(PatternError::malformed(0, "signature name is empty"));
        }

        Ok(Self::new(name, sig.trim()))
    }
}

pub struct SignatureEntry {
    name: String,
    matcher: PatternMatcher,
}

impl SignatureEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    fn scan(&self, buffer: &[u8]) -> ScanHit {
        let offset = self.matcher.search(buffer);
        ScanHit::new(&self.name, self.matcher.pattern().to_signature(), offset)
    }
}

/// Named signatures compiled once up front and then shared read-only by any
/// number of searches.
pub struct SignatureSet {
    entries: Vec<SignatureEntry>,
    index: HashMap<String, usize>,
    prefetch: bool,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            prefetch: true,
        }
    }

    pub fn with_prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = prefetch;
        for entry in &mut self.entries {
            entry.matcher = entry.matcher.clone().with_prefetch(prefetch);
        }
        self
    }

    pub fn compile(signatures: &[NamedSignature]) -> Result<Self, PatternError> {
        let mut set = Self::new();
        for sig in signatures {
            set.add(&sig.name, &sig.signature)?;
        }
        info!("Compiled {} signatures", set.len());
        Ok(set)
    }

    pub fn add(&mut self, name: &str, sig: &str) -> Result<(), PatternError> {
        if self.index.contains_key(name) {
            return Err(PatternError::DuplicateName(name.to_string()));
        }

        let matcher = PatternMatcher::new(signature::compile(sig)?).with_prefetch(self.prefetch);
        debug!("Registered signature '{}' ({} bytes)", name, matcher.len());

        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(SignatureEntry {
            name: name.to_string(),
            matcher,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PatternMatcher> {
        self.index.get(name).map(|&i| &self.entries[i].matcher)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignatureEntry> {
        self.entries.iter()
    }

    /// Runs every signature against `buffer`, one after another, in
    /// registration order.
    pub fn scan(&self, buffer: &[u8]) -> Vec<ScanHit> {
        self.entries.iter().map(|entry| entry.scan(buffer)).collect()
    }

    /// Same result as [`scan`](Self::scan), with the independent searches
    /// spread over the current rayon pool.
    pub fn par_scan(&self, buffer: &[u8]) -> Vec<ScanHit> {
        self.entries.par_iter().map(|entry| entry.scan(buffer)).collect()
    }

    /// Runs `on_hit` after each search, for progress reporting.
    pub fn par_scan_with<F>(&self, buffer: &[u8], on_hit: F) -> Vec<ScanHit>
    where
        F: Fn(&ScanHit) + Sync + Send,
    {
        self.entries
            .par_iter()
            .map(|entry| {
                let hit = entry.scan(buffer);
                on_hit(&hit);
                hit
            })
            .collect()
    }
}

impl Default for SignatureSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Declares process-wide signatures that are compiled on first use and then
/// shared as immutable [`PatternMatcher`]s.
///
/// ```
/// sigscan::lazy_signature! {
///     static PROLOGUE = "55 48 89 E5";
/// }
/// assert_eq!(PROLOGUE.search(&[0x90, 0x55, 0x48, 0x89, 0xE5]), Some(1));
/// ```
///
/// A malformed signature is a programming error and panics on first access.
#[macro_export]
macro_rules! lazy_signature {
    ($($(#[$meta:meta])* $vis:vis static $name:ident = $sig:expr;)+) => {
        $(
            $(#[$meta])*
            $vis static $name: $crate::once_cell::sync::Lazy<$crate::pattern::PatternMatcher> =
                $crate::once_cell::sync::Lazy::new(|| {
                    match $crate::pattern::PatternMatcher::from_signature($sig) {
                        Ok(matcher) => matcher,
                        Err(e) => panic!("invalid signature {}: {}", stringify!($name), e),
                    }
                });
        )+
    };
}
