/// Process-level tests for the fixture runner
///
/// These drive real child processes through `/bin/sh`:
/// 1. Matching output passes, mismatches fail with diagnostics
/// 2. A failing fixture never stops the ones after it
/// 3. Launch failures and timeouts get their own verdicts
/// 4. Missing fixture directories and orphan inputs produce no report lines

#[cfg(all(test, unix))]
mod runner_tests {
    use crate::discovery::discover_fixtures;
    use crate::engine::RunCommand;
    use crate::executor::{run_fixtures, run_tests};
    use cphelper_common::types::{ExecutionResult, SourceFile, Verdict};
    use cphelper_common::{Config, HelperError};
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::{tempdir, TempDir};

    const ADDER: &str = "read a b; echo $((a + b))";

    fn sh(script: &str) -> RunCommand {
        RunCommand::new("sh", &["-c", script])
    }

    fn fixture_root(problem: &str, files: &[(&str, &str)]) -> TempDir {
        let root = tempdir().unwrap();
        let dir = root.path().join(problem);
        fs::create_dir_all(&dir).unwrap();
        for (name, body) in files {
            fs::write(dir.join(name), body).unwrap();
        }
        root
    }

    fn config_for(root: &Path) -> Config {
        let mut config = Config::with_home(root);
        config.test_root = root.to_path_buf();
        config
    }

    async fn run_script(
        root: &Path,
        problem: &str,
        cmd: &RunCommand,
        timeout: Option<Duration>,
    ) -> (Vec<ExecutionResult>, String) {
        let fixtures = discover_fixtures(&root.join(problem)).unwrap();
        let mut out = Vec::new();
        let results = run_fixtures(&fixtures, cmd, timeout, &mut out).await.unwrap();
        (results, String::from_utf8(out).unwrap())
    }

    /// Test: program output matching the expected file passes
    #[tokio::test]
    async fn test_add_passes() {
        let root = fixture_root("add", &[("input1.txt", "3 4"), ("output1.txt", "7\n")]);

        let (results, report) = run_script(root.path(), "add", &sh(ADDER), None).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].fixture_id, "input1.txt");
        assert_eq!(results[0].verdict, Verdict::Pass);
        assert!(report.starts_with("Test Case: input1.txt\nStatus: PASS\nTime: "));
        assert!(!report.contains("Expected:"));
    }

    /// Test: wrong output fails and shows both normalized blocks
    #[tokio::test]
    async fn test_wrong_answer_fails() {
        let root = fixture_root("add", &[("input1.txt", "3 4"), ("output1.txt", "7\n")]);

        let (results, report) = run_script(root.path(), "add", &sh("echo 8"), None).await;

        assert_eq!(results[0].verdict, Verdict::Fail);
        assert!(report.contains("Status: FAIL\n"));
        assert!(report.contains("Expected:\n7\nActual:\n8\n"));
    }

    /// Test: a failing fixture does not abort the remaining ones
    #[tokio::test]
    async fn test_failure_does_not_stop_run() {
        let root = fixture_root(
            "add",
            &[
                ("input1.txt", "1 1"),
                ("output1.txt", "3"),
                ("input2.txt", "2 2"),
                ("output2.txt", "4"),
            ],
        );

        let (results, report) = run_script(root.path(), "add", &sh(ADDER), None).await;

        let verdicts: Vec<_> = results.iter().map(|r| r.verdict).collect();
        assert_eq!(verdicts, vec![Verdict::Fail, Verdict::Pass]);
        assert_eq!(report.matches("Test Case: ").count(), 2);
        assert!(report.find("input1.txt").unwrap() < report.find("input2.txt").unwrap());
    }

    /// Test: multi-line output is compared with every newline stripped
    #[tokio::test]
    async fn test_embedded_newlines_ignored() {
        let root = fixture_root("lines", &[("input1.txt", ""), ("output1.txt", "123\n")]);

        let (results, _) = run_script(root.path(), "lines", &sh("printf '1\\n2\\n3\\n'"), None).await;

        assert_eq!(results[0].verdict, Verdict::Pass);
    }

    /// Test: an unlaunchable program is reported as ERROR and the run goes on
    #[tokio::test]
    async fn test_launch_failure_reported() {
        let root = fixture_root(
            "add",
            &[
                ("input1.txt", "3 4"),
                ("output1.txt", "7"),
                ("input2.txt", "1 2"),
                ("output2.txt", "3"),
            ],
        );
        let cmd = RunCommand::new("./cphelper-missing-artifact", &[]);

        let (results, report) = run_script(root.path(), "add", &cmd, None).await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.verdict == Verdict::Error));
        assert!(report.contains("Status: ERROR\n"));
        assert!(report.contains("Error: "));
    }

    /// Test: a program that literally prints ERROR is judged on its output
    #[tokio::test]
    async fn test_error_output_is_not_launch_failure() {
        let root = fixture_root("err", &[("input1.txt", ""), ("output1.txt", "ERROR\n")]);

        let (results, _) = run_script(root.path(), "err", &sh("echo ERROR"), None).await;

        assert_eq!(results[0].verdict, Verdict::Pass);
        assert!(results[0].error.is_none());
    }

    /// Test: with a timeout configured, a hanging program is killed
    #[tokio::test]
    async fn test_timeout_verdict() {
        let root = fixture_root("slow", &[("input1.txt", ""), ("output1.txt", "done")]);
        let cmd = RunCommand::new("sleep", &["5"]);

        let (results, report) =
            run_script(root.path(), "slow", &cmd, Some(Duration::from_millis(200))).await;

        assert_eq!(results[0].verdict, Verdict::Timeout);
        assert!(results[0].elapsed < Duration::from_secs(5));
        assert!(report.contains("Status: TIMEOUT\n"));
    }

    /// Test: an input without its output file emits nothing
    #[tokio::test]
    async fn test_orphan_input_emits_nothing() {
        let root = fixture_root("add", &[("input2.txt", "3 4")]);
        let source = SourceFile::parse("add.cpp");
        let mut out = Vec::new();

        let results = run_tests(&source, &config_for(root.path()), &mut out).await.unwrap();

        assert!(results.is_empty());
        assert!(out.is_empty());
    }

    /// Test: missing fixture directory aborts before anything runs
    #[tokio::test]
    async fn test_missing_fixture_dir() {
        let root = tempdir().unwrap();
        let source = SourceFile::parse("add.cpp");
        let mut out = Vec::new();

        let err = run_tests(&source, &config_for(root.path()), &mut out).await.unwrap_err();

        assert!(matches!(err, HelperError::FixtureDirNotFound(ref p) if p == &root.path().join("add")));
        assert!(out.is_empty());
    }

    /// Test: unsupported extension aborts before any fixture runs
    #[tokio::test]
    async fn test_unsupported_extension() {
        let root = fixture_root("add", &[("input1.txt", "3 4"), ("output1.txt", "7")]);
        let source = SourceFile::parse("add.rs");
        let mut out = Vec::new();

        let err = run_tests(&source, &config_for(root.path()), &mut out).await.unwrap_err();

        assert!(matches!(err, HelperError::UnsupportedFileType(ref ext) if ext == "rs"));
        assert!(out.is_empty());
    }
}
