//! Provider seam for the managed-cache API.
//!
//! The pipeline only sees plain-data records through the [`CacheProvider`]
//! trait; the production implementation wraps the ElastiCache SDK client and
//! drives its paginators to completion. A page failure or tag-lookup failure
//! surfaces as an error and aborts the run.

use async_trait::async_trait;
use aws_sdk_elasticache::Client;
use aws_smithy_types::error::display::DisplayErrorContext;
use serde::Serialize;
use tracing::debug;

use crate::error::{InventoryError, Result};

/// One engine-version record from the provider's version listing.
#[derive(Debug, Clone)]
pub struct EngineVersionRecord {
    pub engine: String,
    pub version: String,
}

/// One raw cluster entry, as listed by the provider. Replicated deployments
/// appear once per node, all sharing a `replication_group_id`.
#[derive(Debug, Clone)]
pub struct RawCluster {
    pub cluster_id: String,
    pub arn: String,
    pub node_type: String,
    pub engine: String,
    pub engine_version: String,
    pub replication_group_id: Option<String>,
    pub at_rest_encryption: bool,
    pub transit_encryption: bool,
}

/// A resource tag. Order within a tag set is the order the provider returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Access to the managed-cache provider API.
#[async_trait]
pub trait CacheProvider {
    /// All engine-version records, across every page of the listing.
    async fn engine_versions(&self) -> Result<Vec<EngineVersionRecord>>;

    /// All raw cluster entries, across every page of the listing, in
    /// listing order.
    async fn clusters(&self) -> Result<Vec<RawCluster>>;

    /// The tag set for one resource ARN, in provider order.
    async fn resource_tags(&self, arn: &str) -> Result<Vec<Tag>>;
}

/// Production provider backed by the ElastiCache SDK client.
pub struct ElastiCacheProvider {
    client: Client,
}

impl ElastiCacheProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn api_error(err: impl std::error::Error) -> InventoryError {
    InventoryError::Api {
        message: DisplayErrorContext(err).to_string(),
    }
}

/// Pull a required field out of an SDK record, erroring instead of
/// panicking when the API omits it.
fn required(value: Option<&str>, resource: &str, field: &'static str) -> Result<String> {
    value
        .map(str::to_owned)
        .ok_or_else(|| InventoryError::IncompleteRecord {
            resource: resource.to_string(),
            field,
        })
}

#[async_trait]
impl CacheProvider for ElastiCacheProvider {
    async fn engine_versions(&self) -> Result<Vec<EngineVersionRecord>> {
        let mut records = Vec::new();
        let mut pages = self
            .client
            .describe_cache_engine_versions()
            .into_paginator()
            .send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(api_error)?;
            for version in page.cache_engine_versions() {
                records.push(EngineVersionRecord {
                    engine: required(version.engine(), "engine version listing", "Engine")?,
                    version: required(
                        version.engine_version(),
                        "engine version listing",
                        "EngineVersion",
                    )?,
                });
            }
        }
        debug!(count = records.len(), "fetched engine version records");
        Ok(records)
    }

    async fn clusters(&self) -> Result<Vec<RawCluster>> {
        let mut clusters = Vec::new();
        let mut pages = self.client.describe_cache_clusters().into_paginator().send();
        while let Some(page) = pages.next().await {
            let page = page.map_err(api_error)?;
            for cluster in page.cache_clusters() {
                let id = required(cluster.cache_cluster_id(), "cluster listing", "CacheClusterId")?;
                clusters.push(RawCluster {
                    arn: required(cluster.arn(), &id, "ARN")?,
                    node_type: required(cluster.cache_node_type(), &id, "CacheNodeType")?,
                    engine: required(cluster.engine(), &id, "Engine")?,
                    engine_version: required(cluster.engine_version(), &id, "EngineVersion")?,
                    replication_group_id: cluster.replication_group_id().map(str::to_owned),
                    // Memcached clusters omit these flags entirely.
                    at_rest_encryption: cluster.at_rest_encryption_enabled().unwrap_or(false),
                    transit_encryption: cluster.transit_encryption_enabled().unwrap_or(false),
                    cluster_id: id,
                });
            }
        }
        debug!(count = clusters.len(), "fetched raw cluster records");
        Ok(clusters)
    }

    async fn resource_tags(&self, arn: &str) -> Result<Vec<Tag>> {
        let output = self
            .client
            .list_tags_for_resource()
            .resource_name(arn)
            .send()
            .await
            .map_err(|err| InventoryError::Api {
                message: format!(
                    "failed to list tags for '{}': {}",
                    arn,
                    DisplayErrorContext(err)
                ),
            })?;
        output
            .tag_list()
            .iter()
            .map(|tag| {
                Ok(Tag {
                    key: required(tag.key(), arn, "tag Key")?,
                    value: required(tag.value(), arn, "tag Value")?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory provider for pipeline tests.

    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    pub struct FakeProvider {
        pub versions: Vec<EngineVersionRecord>,
        pub clusters: Vec<RawCluster>,
        pub tags: HashMap<String, Vec<Tag>>,
        /// When set, every tag lookup fails with this message.
        pub tag_error: Option<String>,
    }

    impl FakeProvider {
        pub fn version(mut self, engine: &str, version: &str) -> Self {
            self.versions.push(EngineVersionRecord {
                engine: engine.to_string(),
                version: version.to_string(),
            });
            self
        }

        pub fn cluster(mut self, cluster: RawCluster) -> Self {
            self.clusters.push(cluster);
            self
        }

        pub fn tagged(mut self, arn: &str, tags: &[(&str, &str)]) -> Self {
            self.tags.insert(
                arn.to_string(),
                tags.iter()
                    .map(|(k, v)| Tag {
                        key: k.to_string(),
                        value: v.to_string(),
                    })
                    .collect(),
            );
            self
        }
    }

    #[async_trait]
    impl CacheProvider for FakeProvider {
        async fn engine_versions(&self) -> Result<Vec<EngineVersionRecord>> {
            Ok(self.versions.clone())
        }

        async fn clusters(&self) -> Result<Vec<RawCluster>> {
            Ok(self.clusters.clone())
        }

        async fn resource_tags(&self, arn: &str) -> Result<Vec<Tag>> {
            if let Some(message) = &self.tag_error {
                return Err(InventoryError::Api {
                    message: message.clone(),
                });
            }
            Ok(self.tags.get(arn).cloned().unwrap_or_default())
        }
    }

    /// A plain redis cluster with no replication group.
    pub fn redis_cluster(id: &str, version: &str) -> RawCluster {
        RawCluster {
            cluster_id: id.to_string(),
            arn: format!("arn:aws:elasticache:us-east-1:123456789012:cluster:{id}"),
            node_type: "cache.t3.micro".to_string(),
            engine: "redis".to_string(),
            engine_version: version.to_string(),
            replication_group_id: None,
            at_rest_encryption: false,
            transit_encryption: false,
        }
    }
}
