//! Primary container definitions for managed inference models

use crate::{ImageCoordinates, InstanceType, MlstackResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Environment variable naming the Hugging Face Hub model
pub const HF_MODEL_ID: &str = "HF_MODEL_ID";
/// Environment variable naming the pipeline task
pub const HF_TASK: &str = "HF_TASK";

/// Container definition handed to the provisioning layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDefinition {
    /// Fully qualified image reference
    pub image: String,
    /// Environment passed to the inference toolkit
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

impl ContainerDefinition {
    /// Build the container for a Hugging Face model on `instance_type`
    pub fn for_model(
        instance_type: &InstanceType,
        region: &str,
        model_id: &str,
        task: &str,
        coordinates: &ImageCoordinates,
    ) -> MlstackResult<Self> {
        let image = coordinates.for_instance(instance_type, region)?;
        info!(
            instance_type = %instance_type,
            model_id,
            task,
            image = %image,
            "Built container definition"
        );

        Ok(Self {
            image: image.to_string(),
            environment: BTreeMap::new(),
        }
        .with_env(HF_MODEL_ID, model_id)
        .with_env(HF_TASK, task))
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn to_json_pretty(&self) -> MlstackResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
