//! Mapping resolution: which src→dest mappings does this run version?
//!
//! Internal mode versions the mappings declared on the rev target
//! itself. External mode borrows another task's configuration from the
//! store and normalizes it with the same contract used for any task's
//! file declarations - and takes exclusive ownership of the mapping
//! source: declaring own mappings alongside it is a usage conflict.

use crate::config::RevOptions;
use crate::store::{ConfigStore, Mapping, TaskConfig, TaskRef, normalize};
use crate::{debug, log};

use super::RevError;

/// Resolve the ordered mapping sequence for one rev target.
pub fn resolve(
    store: &ConfigStore,
    own: &TaskRef,
    config: &TaskConfig,
    options: &RevOptions,
) -> Result<Vec<Mapping>, RevError> {
    let mappings = match &options.external_task {
        Some(external_task) => {
            debug!("rev"; "external task mode");

            let external_target = options.external_target_or(&own.target);
            let external = TaskRef::new(external_task.as_str(), external_target);
            log!("rev"; "versioning files from {external} task");

            let Some(borrowed) = store.get(&external.task, &external.target) else {
                return Err(RevError::MissingExternalConfig {
                    external_ref: external.to_string(),
                });
            };

            // External mode owns the mapping source exclusively
            if config.declares_mappings() {
                return Err(RevError::ConflictingMappings {
                    task_ref: own.to_string(),
                    external_ref: external.to_string(),
                });
            }

            normalize::normalize_files(borrowed)
        }
        None => {
            debug!("rev"; "internal task mode");
            normalize::normalize_files(config)
        }
    };

    if mappings.is_empty() {
        return Err(RevError::NoMappings {
            task_ref: own.to_string(),
        });
    }

    Ok(mappings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileSpec;
    use std::path::PathBuf;

    fn own_ref() -> TaskRef {
        TaskRef::new("rev", "dist")
    }

    fn concat_config() -> TaskConfig {
        TaskConfig {
            src: Some(vec!["a.js".into(), "b.js".into()]),
            dest: Some("out/bundle.js".into()),
            ..TaskConfig::default()
        }
    }

    #[test]
    fn test_internal_mode_uses_own_declaration() {
        let store = ConfigStore::new();
        let config = concat_config();
        let mappings = resolve(&store, &own_ref(), &config, &RevOptions::default()).unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].dest, PathBuf::from("out/bundle.js"));
    }

    #[test]
    fn test_internal_mode_without_mappings_is_fatal() {
        let store = ConfigStore::new();
        let err = resolve(
            &store,
            &own_ref(),
            &TaskConfig::default(),
            &RevOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RevError::NoMappings { .. }));
    }

    #[test]
    fn test_external_mode_borrows_mappings() {
        let mut store = ConfigStore::new();
        store.set("concat", "dist", concat_config());

        let options = RevOptions {
            external_task: Some("concat".into()),
            ..RevOptions::default()
        };
        let mappings = resolve(&store, &own_ref(), &TaskConfig::default(), &options).unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].sources.len(), 2);
    }

    #[test]
    fn test_external_target_defaults_to_own_target() {
        let mut store = ConfigStore::new();
        store.set("concat", "release", concat_config());

        let options = RevOptions {
            external_task: Some("concat".into()),
            external_target: Some("release".into()),
            ..RevOptions::default()
        };
        assert!(resolve(&store, &own_ref(), &TaskConfig::default(), &options).is_ok());

        // Without the explicit target, falls back to "dist" which is absent
        let options = RevOptions {
            external_task: Some("concat".into()),
            ..RevOptions::default()
        };
        let err = resolve(&store, &own_ref(), &TaskConfig::default(), &options).unwrap_err();
        assert!(matches!(err, RevError::MissingExternalConfig { .. }));
    }

    #[test]
    fn test_external_mode_rejects_own_mappings() {
        let mut store = ConfigStore::new();
        store.set("concat", "dist", concat_config());

        let options = RevOptions {
            external_task: Some("concat".into()),
            ..RevOptions::default()
        };
        let own_config = TaskConfig {
            files: Some(vec![FileSpec {
                src: vec!["own.js".into()],
                dest: "out/own.js".into(),
            }]),
            ..TaskConfig::default()
        };
        let err = resolve(&store, &own_ref(), &own_config, &options).unwrap_err();
        assert!(matches!(err, RevError::ConflictingMappings { .. }));
    }

    #[test]
    fn test_missing_external_config_is_fatal() {
        let store = ConfigStore::new();
        let options = RevOptions {
            external_task: Some("uglify".into()),
            ..RevOptions::default()
        };
        let err = resolve(&store, &own_ref(), &TaskConfig::default(), &options).unwrap_err();
        assert!(matches!(err, RevError::MissingExternalConfig { .. }));
    }
}
