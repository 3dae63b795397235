//! CLI commands implementation

use anyhow::{Context, Result};
use mlstack_core::{
    resolve_region, ContainerDefinition, HardwareVariant, InstanceType, MlstackConfig,
};
use std::path::Path;
use tracing::debug;

/// How the image variant is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSelection {
    /// Classify this instance type
    Instance(String),
    /// Use the configured instance type
    Configured,
    /// Skip classification
    Forced(HardwareVariant),
}

impl ImageSelection {
    pub fn from_flags(instance_type: Option<String>, gpu: bool, cpu: bool) -> Self {
        match (instance_type, gpu, cpu) {
            (Some(instance_type), _, _) => ImageSelection::Instance(instance_type),
            (None, true, _) => ImageSelection::Forced(HardwareVariant::Gpu),
            (None, _, true) => ImageSelection::Forced(HardwareVariant::Cpu),
            (None, false, false) => ImageSelection::Configured,
        }
    }
}

/// Load the config file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<MlstackConfig> {
    match path {
        Some(path) => MlstackConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(MlstackConfig::default()),
    }
}

/// Classify instance types
pub fn classify(instance_types: &[String]) -> Result<()> {
    // Validate everything before printing anything
    let parsed = instance_types
        .iter()
        .map(|raw| InstanceType::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    for line in classify_lines(&parsed) {
        println!("{}", line);
    }

    Ok(())
}

fn classify_lines(instances: &[InstanceType]) -> Vec<String> {
    instances
        .iter()
        .map(|instance| {
            let kind = if instance.is_accelerator() {
                "accelerator"
            } else {
                "standard"
            };
            format!("{}\t{}", instance, kind)
        })
        .collect()
}

/// Print the image URI
pub fn image_uri(
    config: &MlstackConfig,
    region: Option<&str>,
    selection: ImageSelection,
) -> Result<()> {
    println!("{}", render_image_uri(config, region, selection)?);
    Ok(())
}

fn render_image_uri(
    config: &MlstackConfig,
    region: Option<&str>,
    selection: ImageSelection,
) -> Result<String> {
    let region = resolve_region(region, config.deployment.region.as_deref())?;
    let variant = resolve_variant(config, selection)?;
    debug!(%variant, region = %region, "Selected image variant");

    Ok(config.image.compose(variant, &region)?.to_string())
}

fn resolve_variant(config: &MlstackConfig, selection: ImageSelection) -> Result<HardwareVariant> {
    let variant = match selection {
        ImageSelection::Forced(variant) => variant,
        ImageSelection::Configured => {
            HardwareVariant::from_accelerator(config.deployment.instance_type.is_accelerator())
        }
        ImageSelection::Instance(raw) => {
            HardwareVariant::from_accelerator(InstanceType::parse(&raw)?.is_accelerator())
        }
    };
    Ok(variant)
}

/// Print the container definition
pub fn container(
    config: &MlstackConfig,
    region: Option<&str>,
    instance_type: Option<String>,
    model_id: &str,
    task: &str,
    env: Vec<(String, String)>,
) -> Result<()> {
    let definition = build_container(config, region, instance_type, model_id, task, env)?;
    println!("{}", definition.to_json_pretty()?);
    Ok(())
}

fn build_container(
    config: &MlstackConfig,
    region: Option<&str>,
    instance_type: Option<String>,
    model_id: &str,
    task: &str,
    env: Vec<(String, String)>,
) -> Result<ContainerDefinition> {
    let region = resolve_region(region, config.deployment.region.as_deref())?;
    let instance_type = match instance_type {
        Some(raw) => InstanceType::parse(&raw)?,
        None => config.deployment.instance_type.clone(),
    };

    let definition = env.into_iter().fold(
        ContainerDefinition::for_model(&instance_type, &region, model_id, task, &config.image)?,
        |definition, (key, value)| definition.with_env(key, value),
    );
    Ok(definition)
}

/// Print the effective configuration
pub fn show_config(config: &MlstackConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Parse a `KEY=VALUE` argument
pub fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_from_flags() {
        assert_eq!(
            ImageSelection::from_flags(Some("ml.c5.large".to_string()), false, false),
            ImageSelection::Instance("ml.c5.large".to_string())
        );
        assert_eq!(
            ImageSelection::from_flags(None, true, false),
            ImageSelection::Forced(HardwareVariant::Gpu)
        );
        assert_eq!(
            ImageSelection::from_flags(None, false, true),
            ImageSelection::Forced(HardwareVariant::Cpu)
        );
        assert_eq!(
            ImageSelection::from_flags(None, false, false),
            ImageSelection::Configured
        );
    }

    #[test]
    fn test_resolve_variant() {
        let config = MlstackConfig::default();
        assert_eq!(
            resolve_variant(&config, ImageSelection::Configured).unwrap(),
            HardwareVariant::Gpu
        );
        assert_eq!(
            resolve_variant(&config, ImageSelection::Instance("ml.inf1.xlarge".to_string()))
                .unwrap(),
            HardwareVariant::Cpu
        );
        assert!(resolve_variant(&config, ImageSelection::Instance("ml.".to_string())).is_err());
    }

    #[test]
    fn test_render_image_uri() {
        let config = MlstackConfig::default();

        let uri = render_image_uri(&config, Some("us-east-1"), ImageSelection::Configured).unwrap();
        assert_eq!(
            uri,
            "763104351884.dkr.ecr.us-east-1.amazonaws.com/huggingface-pytorch-inference:1.10.2-transformers4.17.0-gpu-py38-cu113-ubuntu20.04"
        );

        let uri = render_image_uri(
            &config,
            Some("eu-west-1"),
            ImageSelection::Instance("ml.c5.large".to_string()),
        )
        .unwrap();
        assert!(uri.starts_with("763104351884.dkr.ecr.eu-west-1.amazonaws.com/"));
        assert!(uri.ends_with("-cpu-py38-ubuntu20.04"));
    }

    #[test]
    fn test_render_image_uri_errors() {
        let config = MlstackConfig::default();
        let err = render_image_uri(
            &config,
            Some("us-east-1"),
            ImageSelection::Instance("badformat".to_string()),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Malformed instance type: badformat");

        assert!(render_image_uri(&config, Some("us east/1"), ImageSelection::Configured).is_err());
    }

    #[test]
    fn test_build_container_applies_env_in_order() {
        let mut config = MlstackConfig::default();
        config.image.python_version = "39".to_string();

        let definition = build_container(
            &config,
            Some("us-west-2"),
            Some("ml.m5.xlarge".to_string()),
            "t5-small",
            "summarization",
            vec![
                ("LOG_LEVEL".to_string(), "info".to_string()),
                ("LOG_LEVEL".to_string(), "debug".to_string()),
                ("HF_TASK".to_string(), "translation".to_string()),
            ],
        )
        .unwrap();

        assert!(definition.image.contains(".us-west-2."));
        assert!(definition.image.contains("-cpu-py39-"));
        assert_eq!(definition.environment["HF_MODEL_ID"], "t5-small");
        assert_eq!(definition.environment["HF_TASK"], "translation");
        assert_eq!(definition.environment["LOG_LEVEL"], "debug");
        assert_eq!(definition.environment.len(), 3);
    }

    #[test]
    fn test_build_container_uses_configured_instance_type() {
        let definition = build_container(
            &MlstackConfig::default(),
            Some("us-east-1"),
            None,
            "t5-small",
            "summarization",
            Vec::new(),
        )
        .unwrap();
        assert!(definition.image.contains("-gpu-py38-cu113-"));

        assert!(build_container(
            &MlstackConfig::default(),
            Some("us-east-1"),
            Some("ml.".to_string()),
            "t5-small",
            "summarization",
            Vec::new(),
        )
        .is_err());
    }

    #[test]
    fn test_classify_lines() {
        let instances = vec![
            InstanceType::parse("ml.g4dn.xlarge").unwrap(),
            InstanceType::parse("ml.c5.large").unwrap(),
        ];
        assert_eq!(
            classify_lines(&instances),
            vec!["ml.g4dn.xlarge\taccelerator", "ml.c5.large\tstandard"]
        );
    }

    #[test]
    fn test_classify_rejects_malformed() {
        let err = classify(&["ml.p3.2xlarge".to_string(), "badformat".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "Malformed instance type: badformat");
    }

    #[test]
    fn test_parse_env_pair() {
        assert_eq!(
            parse_env_pair("A=b=c").unwrap(),
            ("A".to_string(), "b=c".to_string())
        );
        assert!(parse_env_pair("=x").is_err());
        assert!(parse_env_pair("novalue").is_err());
    }
}
