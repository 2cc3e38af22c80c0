//! Writes one bulk-data file of material groups per model instance.
//!
//! The importer handles one instance at a time, so every instance with at
//! least one material gets its own `<model>_material_<instance>.bdf`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

use crate::bdf::write_document;
use crate::config::ExportConfig;
use crate::error::Error;
use crate::model::ModelSource;
use crate::sets::{SetCollection, SetKind};

/// Extension of the written files.
pub const BDF_EXTENSION: &str = "bdf";

/// Returns the output path for `instance` of the model at `model_path`.
///
/// The model path minus its extension is used as the base name; with an
/// `output_dir` only the file name part of it is kept.
pub fn output_path(model_path: &Path, instance: &str, output_dir: Option<&Path>) -> PathBuf {
    let stem = model_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}_material_{instance}.{BDF_EXTENSION}");

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => model_path.with_file_name(file_name),
    }
}

/// Writes the document for `sets` to a newly created file at `path`.
///
/// The file is closed when this returns, whether writing succeeded or not.
/// A partially written file is left in place.
pub fn write_file(path: &Path, sets: &SetCollection, kind: SetKind) -> Result<(), Error> {
    let file = File::create(path).map_err(|err| Error::CreateOutput(err, path.to_path_buf()))?;
    write_document(BufWriter::new(file), sets, kind)?;
    Ok(())
}

/// Exports the material groups of every selected instance of `model`.
///
/// Returns the paths of the files written. Instances without any material
/// are reported and produce no file.
#[tracing::instrument(skip_all, fields(model = %model.path().display()))]
pub fn export_model<M: ModelSource>(model: &M, config: &ExportConfig) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::new();
    let mut matched = false;

    for instance in model.instance_names() {
        if let Some(wanted) = config.instance.as_deref() {
            if wanted != instance {
                tracing::info!(%instance, %wanted, "skipping instance");
                continue;
            }
        }
        matched = true;

        tracing::info!(%instance, "reporting material groups");
        let sets = model.material_sets(instance)?;

        if sets.is_empty() {
            tracing::info!(%instance, "no materials");
            continue;
        }

        let path = output_path(model.path(), instance, config.output_dir.as_deref());
        write_file(&path, &sets, config.set_kind)?;
        tracing::debug!(%instance, path = %path.display(), sets = sets.len(), "wrote material groups");

        written.push(path);
    }

    if let Some(wanted) = config.instance.as_deref() {
        if !matched {
            return Err(Error::UnknownInstance(wanted.to_string()));
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JsonModel;
    use assert_matches::assert_matches;
    use test_case::test_case;

    const MODEL: &str = r#"{
        "sections": {
            "Sec-Steel": { "material": "STEEL" },
            "Sec-Alu": { "material": "ALU" },
            "Sec-Rigid": {}
        },
        "instances": [
            {
                "name": "PART-1-1",
                "section_assignments": [
                    { "section": "Sec-Steel", "elements": [1, 2, 3, 4, 10, 11, 12] },
                    { "section": "Sec-Alu", "elements": [5, 6] }
                ]
            },
            {
                "name": "RIGID-1",
                "section_assignments": [{ "section": "Sec-Rigid", "elements": [1] }]
            },
            {
                "name": "PART-2-1",
                "section_assignments": [{ "section": "Sec-Alu", "elements": [7] }]
            }
        ]
    }"#;

    fn model_in(dir: &Path) -> JsonModel {
        let path = dir.join("Job-1.json");
        std::fs::write(&path, MODEL).unwrap();
        JsonModel::open(&path).unwrap()
    }

    #[test_case("runs/Job-1.odb", "PART-1-1", None => PathBuf::from("runs/Job-1_material_PART-1-1.bdf"); "beside model")]
    #[test_case("Job-1", "A", None => PathBuf::from("Job-1_material_A.bdf"); "no extension")]
    #[test_case("runs/Job.v2.json", "A", None => PathBuf::from("runs/Job.v2_material_A.bdf"); "only last extension removed")]
    #[test_case("runs/Job-1.odb", "A", Some("out") => PathBuf::from("out/Job-1_material_A.bdf"); "output dir")]
    fn test_output_path(model: &str, instance: &str, dir: Option<&str>) -> PathBuf {
        output_path(Path::new(model), instance, dir.map(Path::new))
    }

    #[test]
    fn test_export_writes_one_file_per_instance_with_materials() {
        let dir = tempfile::tempdir().unwrap();
        let model = model_in(dir.path());

        let written = export_model(&model, &ExportConfig::default()).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("Job-1_material_PART-1-1.bdf"),
                dir.path().join("Job-1_material_PART-2-1.bdf"),
            ]
        );
        assert!(!dir.path().join("Job-1_material_RIGID-1.bdf").exists());

        let part1 = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(
            part1,
            "CEND\n\
             SET    1 = 5,6\n\
             $HMSET        1        2 \"ALU\"\n\
             SET    2 = 1 THRU 4,10 THRU 12\n\
             $HMSET        2        2 \"STEEL\"\n\
             BEGIN BULK\n\
             ENDDATA\n"
        );
    }

    #[test]
    fn test_export_single_instance_as_node_sets() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let model = model_in(dir.path());
        let config = ExportConfig {
            set_kind: SetKind::Node,
            instance: Some("PART-2-1".to_string()),
            output_dir: Some(out.path().to_path_buf()),
        };

        let written = export_model(&model, &config).unwrap();

        assert_eq!(written, vec![out.path().join("Job-1_material_PART-2-1.bdf")]);
        let text = std::fs::read_to_string(&written[0]).unwrap();
        assert!(text.contains("$HMSET        1        1 \"ALU\"\n"));
    }

    #[test]
    fn test_export_selected_instance_without_materials() {
        let dir = tempfile::tempdir().unwrap();
        let model = model_in(dir.path());
        let config = ExportConfig {
            instance: Some("RIGID-1".to_string()),
            ..Default::default()
        };

        let written = export_model(&model, &config).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_export_unknown_instance() {
        let dir = tempfile::tempdir().unwrap();
        let model = model_in(dir.path());
        let config = ExportConfig {
            instance: Some("MISSING".to_string()),
            ..Default::default()
        };

        assert_matches!(
            export_model(&model, &config),
            Err(Error::UnknownInstance(name)) if name == "MISSING"
        );
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let model = model_in(dir.path());
        let config = ExportConfig {
            output_dir: Some(dir.path().join("does").join("not").join("exist")),
            ..Default::default()
        };

        assert_matches!(export_model(&model, &config), Err(Error::CreateOutput(_, _)));
    }

    #[test]
    fn test_export_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let model = model_in(dir.path());

        let first = export_model(&model, &ExportConfig::default()).unwrap();
        let first_text = std::fs::read(&first[0]).unwrap();
        let second = export_model(&model, &ExportConfig::default()).unwrap();
        let second_text = std::fs::read(&second[0]).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_text, second_text);
    }
}
