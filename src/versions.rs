//! Version Oracle: reduce the provider's engine-version listing to the
//! highest version per engine family.
//!
//! Both families start at a `0.0.0` sentinel so a family with no records
//! still resolves. Ordering is numeric major.minor.patch comparison, never
//! lexicographic; shorthand versions such as `7.0` are zero-padded before
//! parsing. Anything that still fails to parse, or any engine outside the
//! two recognized families, aborts the run.

use std::fmt;

use semver::Version;
use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::provider::CacheProvider;

/// The two recognized cache engine families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineFamily {
    Redis,
    Memcached,
}

impl EngineFamily {
    /// Strict parse: any other engine name is a fatal configuration error.
    pub fn parse(engine: &str) -> Result<Self> {
        match engine {
            "redis" => Ok(Self::Redis),
            "memcached" => Ok(Self::Memcached),
            other => Err(InventoryError::UnknownEngine {
                engine: other.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Memcached => "memcached",
        }
    }
}

impl fmt::Display for EngineFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed engine version that remembers the provider's original string.
/// The parsed form drives ordering and equality; the original form is what
/// reports show, so `7.0` and `7.0.0` compare equal but render differently.
#[derive(Debug, Clone)]
pub struct EngineVersion {
    version: Version,
    raw: String,
}

impl PartialEq for EngineVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for EngineVersion {}

impl EngineVersion {
    pub fn parse(raw: &str) -> Result<Self> {
        // The provider reports some versions without a patch (or minor)
        // component; pad with zeros so semver accepts them.
        let normalized = match raw.bytes().filter(|b| *b == b'.').count() {
            0 => format!("{raw}.0.0"),
            1 => format!("{raw}.0"),
            _ => raw.to_string(),
        };
        let version =
            Version::parse(&normalized).map_err(|err| InventoryError::VersionParse {
                version: raw.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self {
            version,
            raw: raw.to_string(),
        })
    }

    fn sentinel() -> Self {
        Self {
            version: Version::new(0, 0, 0),
            raw: "0.0.0".to_string(),
        }
    }

    /// The provider's original version string.
    pub fn original(&self) -> &str {
        &self.raw
    }
}

impl PartialOrd for EngineVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EngineVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.version.cmp(&other.version)
    }
}

/// Highest engine version seen per family. Monotonically non-decreasing as
/// records are folded in; read-only once the scan completes.
#[derive(Debug, Clone)]
pub struct LatestVersions {
    redis: EngineVersion,
    memcached: EngineVersion,
}

impl Default for LatestVersions {
    fn default() -> Self {
        Self {
            redis: EngineVersion::sentinel(),
            memcached: EngineVersion::sentinel(),
        }
    }
}

impl LatestVersions {
    /// Fold one record in, keeping the maximum per family. Ties replace the
    /// stored value, so the last record at the maximum wins.
    pub fn observe(&mut self, family: EngineFamily, version: EngineVersion) {
        let slot = match family {
            EngineFamily::Redis => &mut self.redis,
            EngineFamily::Memcached => &mut self.memcached,
        };
        if *slot <= version {
            *slot = version;
        }
    }

    pub fn latest(&self, family: EngineFamily) -> &EngineVersion {
        match family {
            EngineFamily::Redis => &self.redis,
            EngineFamily::Memcached => &self.memcached,
        }
    }
}

/// Phase 1: scan every engine-version record and reduce to the per-family
/// maximum.
pub async fn scan_latest_versions<P: CacheProvider>(provider: &P) -> Result<LatestVersions> {
    let mut latest = LatestVersions::default();
    for record in provider.engine_versions().await? {
        let family = EngineFamily::parse(&record.engine)?;
        let version = EngineVersion::parse(&record.version)?;
        latest.observe(family, version);
    }
    debug!(
        redis = latest.latest(EngineFamily::Redis).original(),
        memcached = latest.latest(EngineFamily::Memcached).original(),
        "resolved latest engine versions"
    );
    Ok(latest)
}
