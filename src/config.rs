// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::error;

use crate::fixture::FixtureMode;
use crate::monitor::Monitor;

mod error;
mod fixture;
mod patch;

pub use error::ConfigError;
pub use fixture::FixtureDef;
pub use patch::PatchDef;

/// Parses fixture modes from a YAML file. A file may hold several mode
/// documents.
pub fn parse_fixture_modes(file: &Path) -> Result<Vec<FixtureMode>, ConfigError> {
    let mut modes: Vec<FixtureMode> = Vec::new();

    for document in serde_yml::Deserializer::from_str(&fs::read_to_string(file)?) {
        let def = FixtureDef::deserialize(document)?;
        modes.push(def.to_mode()?);
    }

    Ok(modes)
}

/// Recurses into the given path and returns all valid fixture modes found,
/// keyed by mode name. Files that fail to parse are logged and skipped so a
/// single bad definition doesn't hide the rest of the library.
pub fn get_all_modes(path: &Path) -> Result<HashMap<String, FixtureMode>, ConfigError> {
    let mut modes: HashMap<String, FixtureMode> = HashMap::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            modes.extend(get_all_modes(&path)?);
            continue;
        }

        let extension = path.extension();
        if extension.is_some_and(|ext| ext == "yaml" || ext == "yml") {
            match parse_fixture_modes(&path) {
                Ok(parsed) => parsed.into_iter().for_each(|mode| {
                    modes.insert(mode.name.clone(), mode);
                }),
                Err(e) => error!(
                    err = e.to_string(),
                    file = path.display().to_string(),
                    "Error while parsing fixture definition"
                ),
            }
        }
    }

    Ok(modes)
}

/// Loads a monitor patch from a YAML file, resolving fixture modes against
/// the given library.
pub fn load_patch(
    file: &Path,
    modes: &HashMap<String, FixtureMode>,
) -> Result<Monitor, ConfigError> {
    let patch: PatchDef = serde_yml::from_str(&fs::read_to_string(file)?)?;
    patch.to_monitor(modes)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const WASH: &str = r#"
name: LED Wash
channels:
  - name: Red
    group: intensity
    colour: red
  - name: Green
    group: intensity
    colour: green
  - name: Blue
    group: intensity
    colour: blue
  - name: Dimmer
    group: intensity
"#;

    const SPOT: &str = r#"
name: Spot
channels:
  - name: Pan
    group: pan
  - name: Tilt
    group: tilt
  - name: Dimmer
    group: intensity
physical:
  pan_max: 540
  tilt_max: 270
"#;

    #[test]
    fn test_get_all_modes_recurses() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let nested = dir.path().join("washes");
        fs::create_dir(&nested).unwrap();

        fs::write(nested.join("wash.yaml"), WASH).unwrap();
        fs::write(dir.path().join("spot.yml"), SPOT).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a fixture").unwrap();

        let modes = get_all_modes(dir.path()).expect("should load modes");
        assert_eq!(modes.len(), 2);
        assert!(modes.contains_key("LED Wash"));
        assert!(modes.contains_key("Spot"));
    }

    #[test]
    fn test_bad_file_is_skipped() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        fs::write(dir.path().join("good.yaml"), WASH).unwrap();
        fs::write(dir.path().join("bad.yaml"), "channels: {broken").unwrap();

        let modes = get_all_modes(dir.path()).expect("should load remaining modes");
        assert_eq!(modes.len(), 1);
        assert!(modes.contains_key("LED Wash"));
    }

    #[test]
    fn test_load_patch() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        fs::write(dir.path().join("wash.yaml"), WASH).unwrap();
        let patch_file = dir.path().join("patch.yaml");
        fs::write(
            &patch_file,
            r#"
fixtures:
  - { name: front wash, mode: LED Wash, address: 0 }
"#,
        )
        .unwrap();

        let modes = get_all_modes(dir.path()).unwrap();
        let monitor = load_patch(&patch_file, &modes).expect("patch should load");
        assert_eq!(monitor.fixtures().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let modes = HashMap::new();
        assert!(matches!(
            load_patch(Path::new("/does/not/exist.yaml"), &modes),
            Err(ConfigError::Io(_))
        ));
    }
}
