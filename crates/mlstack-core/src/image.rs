//! Inference image selection
//!
//! Composes references to the pre-built Hugging Face PyTorch inference
//! images published in the regional ECR registries. The accelerator build
//! carries a CUDA suffix on its hardware fragment; the standard build does not.

use crate::{ImageUri, InstanceType, MlstackResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Hardware variant of an inference image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareVariant {
    /// CUDA build for GPU instances
    Gpu,
    /// CPU-only build
    Cpu,
}

impl HardwareVariant {
    pub fn from_accelerator(use_accelerator: bool) -> Self {
        if use_accelerator {
            HardwareVariant::Gpu
        } else {
            HardwareVariant::Cpu
        }
    }
}

impl std::fmt::Display for HardwareVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HardwareVariant::Gpu => write!(f, "gpu"),
            HardwareVariant::Cpu => write!(f, "cpu"),
        }
    }
}

/// Everything except the region that identifies an inference image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageCoordinates {
    /// AWS account owning the deep learning container registry
    pub registry_account: String,
    /// Repository name
    pub repository: String,
    /// PyTorch version
    pub framework_version: String,
    /// transformers library version
    pub transformers_version: String,
    /// Python version without the dot (e.g., "38")
    pub python_version: String,
    /// CUDA toolkit suffix for GPU builds
    pub cuda_version: String,
    /// Base OS tag
    pub os_tag: String,
}

impl Default for ImageCoordinates {
    fn default() -> Self {
        Self {
            registry_account: "763104351884".to_string(),
            repository: "huggingface-pytorch-inference".to_string(),
            framework_version: "1.10.2".to_string(),
            transformers_version: "4.17.0".to_string(),
            python_version: "38".to_string(),
            cuda_version: "cu113".to_string(),
            os_tag: "ubuntu20.04".to_string(),
        }
    }
}

impl ImageCoordinates {
    /// Registry host for a region
    pub fn registry_host(&self, region: &str) -> String {
        format!("{}.dkr.ecr.{}.amazonaws.com", self.registry_account, region)
    }

    /// `gpu-py38-cu113` or `cpu-py38`
    pub fn hardware_fragment(&self, variant: HardwareVariant) -> String {
        match variant {
            HardwareVariant::Gpu => format!("gpu-py{}-{}", self.python_version, self.cuda_version),
            HardwareVariant::Cpu => format!("cpu-py{}", self.python_version),
        }
    }

    pub fn tag(&self, variant: HardwareVariant) -> String {
        format!(
            "{}-transformers{}-{}-{}",
            self.framework_version,
            self.transformers_version,
            self.hardware_fragment(variant),
            self.os_tag
        )
    }

    /// Compose the image reference for a variant in a region
    pub fn compose(&self, variant: HardwareVariant, region: &str) -> MlstackResult<ImageUri> {
        let uri = ImageUri::new(
            self.registry_host(region),
            self.repository.clone(),
            self.tag(variant),
        )?;
        debug!(%variant, region, image = %uri, "Composed inference image");
        Ok(uri)
    }

    /// Compose the image matching an instance type's hardware family
    pub fn for_instance(&self, instance: &InstanceType, region: &str) -> MlstackResult<ImageUri> {
        self.compose(HardwareVariant::from_accelerator(instance.is_accelerator()), region)
    }
}

/// Image reference for the default coordinates.
///
/// Only the accelerator flag and the region vary; every other component is
/// fixed, so the output depends on nothing else. A region that cannot form a
/// registry host (e.g. one containing `/` or whitespace) is an
/// `InvalidImageUri` error.
pub fn image_uri(use_accelerator: bool, region: &str) -> MlstackResult<String> {
    let variant = HardwareVariant::from_accelerator(use_accelerator);
    Ok(ImageCoordinates::default().compose(variant, region)?.to_string())
}

/// Classify `instance_type` and compose the matching default image.
///
/// A malformed instance type is an error; no variant is assumed.
pub fn image_uri_for_instance(instance_type: &str, region: &str) -> MlstackResult<String> {
    let instance = InstanceType::parse(instance_type)?;
    image_uri(instance.is_accelerator(), region)
}
