//! Access to the finite-element model the sets are extracted from.
//!
//! [`ModelSource`] is the boundary to whatever holds the mesh and its
//! section assignments. [`JsonModel`] implements it for a JSON export of
//! that data:
//!
//! ```json
//! {
//!   "sections": {
//!     "Section-Steel": { "material": "STEEL" },
//!     "Section-Rigid": { "material": null }
//!   },
//!   "instances": [
//!     {
//!       "name": "PART-1-1",
//!       "section_assignments": [
//!         { "section": "Section-Steel", "elements": [1, 2, 3, 4] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Error;
use crate::sets::SetCollection;

/// Source of per-instance material label sets.
pub trait ModelSource {
    /// Path the model was loaded from. Output file names are derived from it.
    fn path(&self) -> &Path;

    /// Names of the instances in the model, in model order.
    fn instance_names(&self) -> Vec<&str>;

    /// Element labels of the instance grouped by material name. Sections
    /// without a material contribute nothing.
    fn material_sets(&self, instance: &str) -> Result<SetCollection, Error>;
}

/// A section definition; only the material matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    /// Material assigned by the section, if any
    #[serde(default)]
    pub material: Option<String>,
}

/// Assignment of a section to a group of elements.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionAssignment {
    /// Name of the assigned section
    pub section: String,
    /// Labels of the elements the section is assigned to
    #[serde(default)]
    pub elements: Vec<u64>,
}

/// A part instance of the assembly.
#[derive(Debug, Clone, Deserialize)]
pub struct Instance {
    /// Instance name, unique within the model
    pub name: String,
    /// Section assignments made on this instance
    #[serde(default)]
    pub section_assignments: Vec<SectionAssignment>,
}

#[derive(Debug, Deserialize)]
struct ModelFile {
    #[serde(default)]
    sections: HashMap<String, Section>,
    #[serde(default)]
    instances: Vec<Instance>,
}

/// A model loaded from a JSON description.
#[derive(Debug)]
pub struct JsonModel {
    path: PathBuf,
    sections: HashMap<String, Section>,
    instances: Vec<Instance>,
}

impl JsonModel {
    /// Reads and parses the model at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|err| Error::ReadModel(err, path.to_path_buf()))?;

        Self::from_json(path, &text)
    }

    /// Parses a model from JSON text, recording `path` as its origin.
    pub fn from_json(path: impl Into<PathBuf>, json: &str) -> Result<Self, Error> {
        let path = path.into();
        let file: ModelFile =
            serde_json::from_str(json).map_err(|err| Error::ParseModel(err, path.clone()))?;

        Ok(Self {
            path,
            sections: file.sections,
            instances: file.instances,
        })
    }
}

impl ModelSource for JsonModel {
    fn path(&self) -> &Path {
        &self.path
    }

    fn instance_names(&self) -> Vec<&str> {
        self.instances.iter().map(|i| i.name.as_str()).collect()
    }

    fn material_sets(&self, instance: &str) -> Result<SetCollection, Error> {
        let instance = self
            .instances
            .iter()
            .find(|i| i.name == instance)
            .ok_or_else(|| Error::UnknownInstance(instance.to_string()))?;

        let mut sets = SetCollection::default();
        for assignment in &instance.section_assignments {
            let section = self.sections.get(&assignment.section).ok_or_else(|| {
                Error::UnknownSection {
                    instance: instance.name.clone(),
                    section: assignment.section.clone(),
                }
            })?;

            match section.material.as_deref() {
                Some(material) if !material.is_empty() => {
                    sets.extend(material, assignment.elements.iter().copied());
                }
                _ => {
                    tracing::debug!(
                        instance = %instance.name,
                        section = %assignment.section,
                        "skipping section without a material"
                    );
                }
            }
        }

        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::BTreeSet;
    use std::io::Write;

    const MODEL: &str = r#"{
        "sections": {
            "Sec-Steel": { "material": "STEEL" },
            "Sec-Steel-Thick": { "material": "STEEL" },
            "Sec-Alu": { "material": "ALU" },
            "Sec-Rigid": { "material": null },
            "Sec-Blank": { "material": "" },
            "Sec-Cohesive": {}
        },
        "instances": [
            {
                "name": "PART-1-1",
                "section_assignments": [
                    { "section": "Sec-Steel", "elements": [1, 2, 3] },
                    { "section": "Sec-Alu", "elements": [10, 11] },
                    { "section": "Sec-Steel-Thick", "elements": [3, 4] },
                    { "section": "Sec-Rigid", "elements": [99] },
                    { "section": "Sec-Blank", "elements": [98] },
                    { "section": "Sec-Cohesive", "elements": [97] }
                ]
            },
            {
                "name": "RIGID-1",
                "section_assignments": [
                    { "section": "Sec-Rigid", "elements": [1, 2] }
                ]
            },
            { "name": "EMPTY-1" }
        ]
    }"#;

    #[test]
    fn test_material_sets_accumulate_per_material() {
        let model = JsonModel::from_json("job.json", MODEL).unwrap();
        let sets = model.material_sets("PART-1-1").unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets.get("STEEL"), Some(&BTreeSet::from([1, 2, 3, 4])));
        assert_eq!(sets.get("ALU"), Some(&BTreeSet::from([10, 11])));
    }

    #[test]
    fn test_instances_without_materials_are_empty() {
        let model = JsonModel::from_json("job.json", MODEL).unwrap();

        assert!(model.material_sets("RIGID-1").unwrap().is_empty());
        assert!(model.material_sets("EMPTY-1").unwrap().is_empty());
    }

    #[test]
    fn test_instance_names_keep_model_order() {
        let model = JsonModel::from_json("job.json", MODEL).unwrap();
        assert_eq!(model.instance_names(), vec!["PART-1-1", "RIGID-1", "EMPTY-1"]);
        assert_eq!(model.path(), Path::new("job.json"));
    }

    #[test]
    fn test_unknown_instance() {
        let model = JsonModel::from_json("job.json", MODEL).unwrap();
        assert_matches!(
            model.material_sets("NOPE"),
            Err(Error::UnknownInstance(name)) if name == "NOPE"
        );
    }

    #[test]
    fn test_unknown_section_is_fatal() {
        let json = r#"{
            "instances": [
                { "name": "A", "section_assignments": [{ "section": "Missing", "elements": [1] }] }
            ]
        }"#;
        let model = JsonModel::from_json("job.json", json).unwrap();

        assert_matches!(
            model.material_sets("A"),
            Err(Error::UnknownSection { instance, section }) if instance == "A" && section == "Missing"
        );
    }

    #[test]
    fn test_malformed_json() {
        assert_matches!(
            JsonModel::from_json("job.json", "{ \"instances\": [ { \"name\": 3 } ] }"),
            Err(Error::ParseModel(_, path)) if path == Path::new("job.json")
        );
        assert_matches!(
            JsonModel::from_json("job.json", "{ \"instances\": [ { \"name\": \"A\", \"section_assignments\": [ { \"section\": \"S\", \"elements\": [-1] } ] } ] }"),
            Err(Error::ParseModel(_, _))
        );
    }

    #[test]
    fn test_open_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(MODEL.as_bytes()).unwrap();

        let model = JsonModel::open(file.path()).unwrap();
        assert_eq!(model.path(), file.path());
        assert_eq!(model.instance_names().len(), 3);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        assert_matches!(JsonModel::open(&path), Err(Error::ReadModel(_, p)) if p == path);
    }
}
