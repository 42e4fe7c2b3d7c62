//! Inventory Builder: join raw cluster entries with their tag sets and the
//! Version Oracle's result, collapsing replication groups to one logical
//! record.
//!
//! Linear single pass in listing order. The only state is the output
//! collection and the seen-set of replication group ids; a tag-lookup
//! failure or an unrecognized engine aborts the run.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::Result;
use crate::provider::{CacheProvider, Tag};
use crate::versions::{EngineFamily, LatestVersions};

/// One logical cache deployment, immutable once retained. For replicated
/// deployments `name` is the replication group id; otherwise the cluster id.
#[derive(Debug, Clone)]
pub struct ClusterRecord {
    pub name: String,
    pub arn: String,
    pub instance_type: String,
    pub engine: EngineFamily,
    pub current_version: String,
    pub latest_version: String,
    pub tags: Vec<Tag>,
    pub at_rest_encryption: bool,
    pub transit_encryption: bool,
}

/// Phase 2: build the deduplicated inventory from the raw cluster listing.
///
/// Each entry is enriched with its tag set before the dedup decision, so
/// nodes of an already-retained replication group still hit the tag lookup
/// (and still abort the run if that lookup fails).
pub async fn collect_inventory<P: CacheProvider>(
    provider: &P,
    latest: &LatestVersions,
) -> Result<Vec<ClusterRecord>> {
    let mut records = Vec::new();
    let mut seen_groups: HashSet<String> = HashSet::new();

    for raw in provider.clusters().await? {
        let family = EngineFamily::parse(&raw.engine)?;
        let tags = provider.resource_tags(&raw.arn).await?;
        for tag in &tags {
            trace!(tag = %serde_json::to_string(tag).unwrap_or_default(), "resource tag");
        }

        let name = match &raw.replication_group_id {
            Some(group) => {
                if !seen_groups.insert(group.clone()) {
                    debug!(
                        cluster = %raw.cluster_id,
                        group = %group,
                        "skipping node of already-retained replication group"
                    );
                    continue;
                }
                group.clone()
            }
            None => raw.cluster_id.clone(),
        };

        records.push(ClusterRecord {
            name,
            arn: raw.arn,
            instance_type: raw.node_type,
            engine: family,
            current_version: raw.engine_version,
            latest_version: latest.latest(family).original().to_string(),
            tags,
            at_rest_encryption: raw.at_rest_encryption,
            transit_encryption: raw.transit_encryption,
        });
    }

    debug!(count = records.len(), "built cluster inventory");
    Ok(records)
}
