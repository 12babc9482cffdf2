// Template generation for new source files
use cphelper_common::types::Language;
use cphelper_common::HelperError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Built-in boilerplate for a file extension
///
/// Pure lookup: the same extension always yields the same text, and nothing
/// outside the supported set produces a template.
pub fn render(ext: &str) -> Result<&'static str, HelperError> {
    let language = Language::from_extension(ext)
        .ok_or_else(|| HelperError::UnsupportedFileType(ext.to_string()))?;
    Ok(builtin(language))
}

fn builtin(language: Language) -> &'static str {
    match language {
        Language::Cpp => cpp_template(),
        Language::Python => python_template(),
        Language::Java => java_template(),
    }
}

fn cpp_template() -> &'static str {
    r#"#include <bits/stdc++.h>
using namespace std;

int main() {
    ios::sync_with_stdio(false);
    cin.tie(nullptr);

    return 0;
}
"#
}

fn python_template() -> &'static str {
    r#"import sys

input = sys.stdin.read

def main():
    pass

if __name__ == '__main__':
    main()
"#
}

fn java_template() -> &'static str {
    r#"public class Main {
    public static void main(String[] args) {
        System.out.println("Hello World");
    }
}
"#
}

/// Path of the user override for a language inside the template directory
pub fn override_path(template_dir: &Path, language: Language) -> PathBuf {
    template_dir.join(format!("template.{}", language.extension()))
}

/// User-provided template text, if one exists and can be read
pub fn load_override(template_dir: &Path, language: Language) -> Option<String> {
    let path = override_path(template_dir, language);
    if !path.is_file() {
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => {
            debug!(path = %path.display(), "Using template override");
            Some(content)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable template override");
            None
        }
    }
}

/// Template text for `ext`, preferring a user override over the built-in
pub fn template_for(ext: &str, template_dir: &Path) -> Result<String, HelperError> {
    let language = Language::from_extension(ext)
        .ok_or_else(|| HelperError::UnsupportedFileType(ext.to_string()))?;

    Ok(load_override(template_dir, language).unwrap_or_else(|| builtin(language).to_string()))
}

/// Write rendered template text to disk
pub fn write(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content)
}
