use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

struct Fixture {
    dir: TempDir,
    dictionary: PathBuf,
    source: PathBuf,
}

fn fixture(source: &str) -> Fixture {
    let dir = tempdir().unwrap();
    let dictionary = dir.path().join("words.txt");
    fs::write(&dictionary, "count\nlength\nmain\n").unwrap();
    let src = dir.path().join("lib.rs");
    fs::write(&src, source).unwrap();
    Fixture {
        dir,
        dictionary,
        source: src,
    }
}

fn idspell(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("idspell").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn reports_misspelled_identifier() {
    let f = fixture("fn count_lenght() {}\n");

    idspell(f.dir.path())
        .arg(&f.source)
        .arg("--dictionary")
        .arg(&f.dictionary)
        .arg("--no-color")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("lib.rs(1,10): Fix spelling of 'lenght'"))
        .stdout(predicate::str::contains("1 error found in 1 file"));
}

#[test]
fn no_fail_exits_zero() {
    let f = fixture("fn count_lenght() {}\n");

    idspell(f.dir.path())
        .arg(&f.source)
        .arg("--dictionary")
        .arg(&f.dictionary)
        .args(["--no-color", "--no-fail"])
        .assert()
        .success();
}

#[test]
fn clean_source_passes() {
    let f = fixture("fn main() { let count = 1; }\n");

    idspell(f.dir.path())
        .arg(f.dir.path())
        .arg("--dictionary")
        .arg(&f.dictionary)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("No spelling errors found"));
}

#[test]
fn fix_list_suggestions_are_shown() {
    let f = fixture("fn count_lenght() {}\n");
    let fixes = f.dir.path().join("fixes.txt");
    fs::write(&fixes, "lenght=length\n").unwrap();

    idspell(f.dir.path())
        .arg(&f.source)
        .arg("--dictionary")
        .arg(&f.dictionary)
        .arg("--fix-list")
        .arg(&fixes)
        .arg("--no-color")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("→ length"));
}

#[test]
fn json_output() {
    let f = fixture("// the wrold\nfn count_lenght() {}\n");

    idspell(f.dir.path())
        .arg(&f.source)
        .arg("--dictionary")
        .arg(&f.dictionary)
        .args(["--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"total_errors\": 3"))
        .stdout(predicate::str::contains("\"word\": \"lenght\""));
}

#[test]
fn save_words_appends_flagged_values() {
    let f = fixture("// wrold\nfn count_lenght() {}\n");
    let saved = f.dir.path().join("flagged.txt");
    fs::write(&saved, "zzqx\n").unwrap();

    idspell(f.dir.path())
        .arg(&f.source)
        .arg("--dictionary")
        .arg(&f.dictionary)
        .arg("--save-words")
        .arg(&saved)
        .args(["--no-color", "--no-fail"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&saved).unwrap(), "lenght\nwrold\nzzqx\n");
}

#[test]
fn local_config_file_is_honored() {
    let f = fixture("fn main() { let wrold = 1; }\n");
    fs::write(
        f.dir.path().join(".idspell.toml"),
        format!(
            "dictionaries = [{:?}]\ninclude_local_identifiers = true\n",
            f.dictionary.display().to_string()
        ),
    )
    .unwrap();

    idspell(f.dir.path())
        .arg(&f.source)
        .arg("--no-color")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Fix spelling of 'wrold'"));
}

#[test]
fn dict_build_subcommand() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let ex = dir.path().join("ex.txt");
    let out = dir.path().join("dict.txt");
    fs::write(&a, "Beta\nalpha\ngamma\n").unwrap();
    fs::write(&ex, "gamma\n").unwrap();

    idspell(dir.path())
        .args(["dict", "build"])
        .arg(&a)
        .arg("--exclude")
        .arg(&ex)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 words written"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "alpha\nbeta\n");
}

#[test]
fn completion_script() {
    let dir = tempdir().unwrap();
    idspell(dir.path())
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("idspell"));
}

#[test]
fn missing_paths_is_an_error() {
    let dir = tempdir().unwrap();
    idspell(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No paths specified"));
}
