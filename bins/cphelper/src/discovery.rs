/// Fixture discovery
///
/// Pairs every `*input*` file in a fixture directory with the file whose
/// name has the first `input` replaced by `output`. Pairs with a missing or
/// unreadable side are dropped without being reported.

use cphelper_common::types::{FixturePair, SourceFile};
use cphelper_common::HelperError;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

const INPUT_TOKEN: &str = "input";
const OUTPUT_TOKEN: &str = "output";

/// Fixture directory for a source file: `<test_root>/<base_name>`
pub fn fixture_dir(test_root: &Path, source: &SourceFile) -> PathBuf {
    test_root.join(&source.base_name)
}

/// Expected-output filename for an input filename, if it is an input at all
pub fn output_name_for(input_name: &str) -> Option<String> {
    input_name
        .contains(INPUT_TOKEN)
        .then(|| input_name.replacen(INPUT_TOKEN, OUTPUT_TOKEN, 1))
}

fn is_readable(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}

/// Eligible fixture pairs in `dir`, sorted by input filename
pub fn discover_fixtures(dir: &Path) -> Result<Vec<FixturePair>, HelperError> {
    if !dir.is_dir() {
        return Err(HelperError::FixtureDirNotFound(dir.to_path_buf()));
    }

    let mut pairs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();

        let Some(output_name) = output_name_for(&name) else {
            continue;
        };

        let input = entry.path();
        let expected = dir.join(&output_name);

        if !is_readable(&input) || !is_readable(&expected) {
            debug!(
                input = %input.display(),
                expected = %expected.display(),
                "Skipping incomplete fixture pair"
            );
            continue;
        }

        pairs.push(FixturePair {
            id: name,
            input,
            expected,
        });
    }

    pairs.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(pairs)
}
