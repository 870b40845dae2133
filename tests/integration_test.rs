// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use bump_version::analyzer::ChangeClassifier;
use bump_version::cli::{run_bump_workflow, BumpWorkflowArgs};
use bump_version::config::ClassifierConfig;
use bump_version::domain::{BumpType, ReleaseStrategy, TagPrefix, Version};
use bump_version::git::{Git2Repository, Repository as _};
use bump_version::version_file::{FileFormat, VersionFile};
use git2::build::CheckoutBuilder;
use git2::{Commit, Oid, Repository, Signature};
use tempfile::TempDir;

fn init_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");
    (temp_dir, repo)
}

fn commit_file(repo: &Repository, rel_path: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().expect("Repository has a workdir");
    let full_path = workdir.join(rel_path);
    fs::create_dir_all(full_path.parent().unwrap()).unwrap();
    fs::write(&full_path, content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(rel_path))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = Signature::now("Test User", "test@example.com").unwrap();

    let parents: Vec<Commit> = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&Commit> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit")
}

fn lightweight_tag(repo: &Repository, name: &str, oid: Oid) {
    repo.tag_lightweight(name, &repo.find_object(oid, None).unwrap(), false)
        .expect("Could not create tag");
}

fn annotated_tag(repo: &Repository, name: &str, oid: Oid) {
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    repo.tag(
        name,
        &repo.find_object(oid, None).unwrap(),
        &sig,
        "release",
        false,
    )
    .expect("Could not create annotated tag");
}

fn switch_branch(repo: &Repository, refname: &str) {
    let target = repo.revparse_single(refname).expect("Could not find branch");
    repo.checkout_tree(&target, Some(CheckoutBuilder::new().force()))
        .expect("Could not check out branch");
    repo.set_head(refname).expect("Could not move HEAD");
}

/// Commit a merge of `theirs` into the current HEAD branch.
fn merge_into_head(repo: &Repository, theirs: Oid, message: &str) -> Oid {
    let ours = repo.head().unwrap().peel_to_commit().unwrap();
    let theirs = repo.find_commit(theirs).unwrap();
    let mut index = repo
        .merge_commits(&ours, &theirs, None)
        .expect("Could not merge");
    assert!(!index.has_conflicts());
    let tree_id = index.write_tree_to(repo).expect("Could not write tree");
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Test User", "test@example.com").unwrap();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&ours, &theirs])
        .expect("Could not create merge commit")
}

/// Build a tagged base, one commit on the current branch, `side_commits` on
/// a `side` branch, and a merge of `side` back. Returns the base commit.
fn branch_and_merge(
    repo: &Repository,
    main_commit: (&str, &str),
    side_commits: &[(&str, &str, &str)],
) -> Oid {
    let base = commit_file(repo, "lib/a.rs", "1", "chore: init");
    lightweight_tag(repo, "lib/v1.0.0", base);
    let main_ref = repo.head().unwrap().name().unwrap().to_string();
    repo.branch("side", &repo.find_commit(base).unwrap(), false)
        .expect("Could not create branch");

    commit_file(repo, main_commit.0, "main", main_commit.1);

    switch_branch(repo, "refs/heads/side");
    let mut side_tip = base;
    for (path, content, message) in side_commits {
        side_tip = commit_file(repo, path, content, message);
    }

    repo.set_head(&main_ref).expect("Could not move HEAD");
    merge_into_head(repo, side_tip, "Merge branch 'side'");
    base
}

fn classifier() -> ChangeClassifier {
    ChangeClassifier::new(&ClassifierConfig::default()).unwrap()
}

fn tag_args(prefix: &str, path: &str) -> BumpWorkflowArgs {
    BumpWorkflowArgs {
        path: path.to_string(),
        strategy: ReleaseStrategy::Tag(TagPrefix::new(prefix)),
        target: None,
        dry_run: false,
        prerelease_suffix: None,
        ci_output: None,
    }
}

#[test]
fn test_tag_mode_feature_since_latest_tag() {
    let (_dir, repo) = init_repo();
    let c1 = commit_file(&repo, "lib/a.rs", "1", "feat: first");
    lightweight_tag(&repo, "lib/v1.0.0", c1);
    let c2 = commit_file(&repo, "lib/a.rs", "2", "fix: second");
    annotated_tag(&repo, "lib/v1.1.0", c2);
    commit_file(&repo, "app/main.rs", "x", "fix: app only");
    commit_file(&repo, "lib/b.rs", "3", "feat: add X");

    let git = Git2Repository::from_git2(repo);
    let result = run_bump_workflow(&git, &classifier(), &tag_args("lib/v", "lib")).unwrap();

    assert_eq!(result.release.version, Version::new(1, 1, 0));
    assert_eq!(result.release.commit, Some(c2.to_string()));
    assert_eq!(result.bump, BumpType::Minor);
    assert_eq!(result.new_version.as_deref(), Some("1.2.0"));
    assert_eq!(result.new_tag.as_deref(), Some("lib/v1.2.0"));
}

#[test]
fn test_commits_outside_path_are_ignored() {
    let (_dir, repo) = init_repo();
    let c1 = commit_file(&repo, "lib/a.rs", "1", "chore: init");
    lightweight_tag(&repo, "lib/v0.1.0", c1);
    commit_file(&repo, "app/main.rs", "x", "feat: app feature");

    let git = Git2Repository::from_git2(repo);
    let result = run_bump_workflow(&git, &classifier(), &tag_args("lib/v", "lib")).unwrap();
    assert_eq!(result.bump, BumpType::None);
    assert_eq!(result.new_version, None);
}

#[test]
fn test_no_tags_only_chore_is_no_bump() {
    let (_dir, repo) = init_repo();
    commit_file(&repo, "svc/README.md", "docs", "chore: update docs");

    let git = Git2Repository::from_git2(repo);
    let result = run_bump_workflow(&git, &classifier(), &tag_args("svc/v", "svc")).unwrap();

    assert_eq!(result.release.version, Version::new(0, 0, 0));
    assert_eq!(result.release.commit, None);
    assert_eq!(result.bump, BumpType::None);
    assert!(!result.file_written);
}

#[test]
fn test_file_mode_breaking_change() {
    let (dir, repo) = init_repo();
    commit_file(
        &repo,
        "api/version.json",
        "{\"version\":\"2.9.9\"}",
        "chore: release 2.9.9",
    );
    commit_file(
        &repo,
        "api/routes.rs",
        "routes",
        "refactor: drop old routes\n\nBREAKING CHANGE: remove API",
    );

    let file = VersionFile::new(dir.path().join("api/version.json"), FileFormat::Json);
    let args = BumpWorkflowArgs {
        path: "api".to_string(),
        strategy: ReleaseStrategy::File {
            file: file.clone(),
            repo_path: "api/version.json".to_string(),
        },
        target: Some(file.clone()),
        dry_run: false,
        prerelease_suffix: None,
        ci_output: None,
    };

    let git = Git2Repository::from_git2(repo);
    let result = run_bump_workflow(&git, &classifier(), &args).unwrap();

    assert_eq!(result.bump, BumpType::Major);
    assert_eq!(result.new_version.as_deref(), Some("3.0.0"));
    assert_eq!(file.read_version().unwrap(), Version::new(3, 0, 0));
}

#[test]
fn test_git2_last_commit_touching_and_messages() {
    let (_dir, repo) = init_repo();
    commit_file(&repo, "VERSION", "0.1.0", "chore: release");
    let c2 = commit_file(&repo, "VERSION", "0.2.0", "chore: release again");
    commit_file(&repo, "src/lib.rs", "x", "fix(core): handle empty input");

    let git = Git2Repository::from_git2(repo);
    assert_eq!(
        git.last_commit_touching("VERSION").unwrap(),
        Some(c2.to_string())
    );
    assert_eq!(
        git.commit_messages("src/", Some(c2.to_string().as_str()))
            .unwrap(),
        "fix(core): handle empty input"
    );
    assert_eq!(git.last_commit_touching("docs").unwrap(), None);
    assert_eq!(git.list_tags("v").unwrap(), Vec::<String>::new());
    assert_eq!(git.resolve_tag("v1.0.0").unwrap(), None);
}

#[test]
fn test_side_branch_commits_count_but_clean_merge_does_not() {
    let (_dir, repo) = init_repo();
    let base = branch_and_merge(
        &repo,
        ("README.md", "docs: readme"),
        &[("lib/b.rs", "b", "feat: side work")],
    );

    let git = Git2Repository::from_git2(repo);
    assert_eq!(
        git.commit_messages("lib", Some(base.to_string().as_str()))
            .unwrap(),
        "feat: side work"
    );

    let result = run_bump_workflow(&git, &classifier(), &tag_args("lib/v", "lib")).unwrap();
    assert_eq!(result.bump, BumpType::Minor);
    assert_eq!(result.new_version.as_deref(), Some("1.1.0"));
}

#[test]
fn test_side_branch_with_no_net_change_still_counts() {
    let (_dir, repo) = init_repo();
    let base = branch_and_merge(
        &repo,
        ("README.md", "docs: readme"),
        &[
            ("lib/a.rs", "2", "feat: experiment"),
            ("lib/a.rs", "1", "chore: back out experiment"),
        ],
    );

    let git = Git2Repository::from_git2(repo);
    let messages = git
        .commit_messages("lib", Some(base.to_string().as_str()))
        .unwrap();
    assert!(messages.contains("feat: experiment"));
    assert!(messages.contains("chore: back out experiment"));
    assert!(!messages.contains("Merge branch"));
    assert!(!messages.contains("docs: readme"));

    let result = run_bump_workflow(&git, &classifier(), &tag_args("lib/v", "lib")).unwrap();
    assert_eq!(result.bump, BumpType::Minor);
}

#[test]
fn test_git2_repo_relative_paths() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "lib/a.rs", "1", "chore: init");

    let git = Git2Repository::from_git2(repo);
    assert_eq!(git.repo_relative(Path::new("lib"), dir.path()).unwrap(), "lib");
    assert_eq!(git.repo_relative(Path::new("."), dir.path()).unwrap(), "");
    assert_eq!(
        git.repo_relative(&dir.path().join("lib/a.rs"), Path::new("/"))
            .unwrap(),
        "lib/a.rs"
    );
}

#[test]
fn test_empty_repository_degrades_to_no_bump() {
    let (_dir, repo) = init_repo();

    let git = Git2Repository::from_git2(repo);
    let result = run_bump_workflow(&git, &classifier(), &tag_args("v", "")).unwrap();
    assert_eq!(result.bump, BumpType::None);
}

mod binary {
    use super::*;

    fn bump_cmd(dir: &Path) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_bump-version"));
        cmd.current_dir(dir).env_remove("GITHUB_OUTPUT");
        cmd
    }

    #[test]
    fn test_help() {
        let output = Command::new(env!("CARGO_BIN_EXE_bump-version"))
            .arg("--help")
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.contains("bump-version"));
        assert!(stdout.contains("--tag-prefix"));
    }

    #[test]
    fn test_missing_path_exits_with_one() {
        let (dir, _repo) = init_repo();
        let output = bump_cmd(dir.path())
            .args(["--tag-prefix", "lib/v"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
    }

    #[test]
    fn test_malformed_flags_exit_with_one() {
        let (dir, _repo) = init_repo();

        let output = bump_cmd(dir.path())
            .args(["--tag-prefix", "lib/v", "--path"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("--path"));

        let output = bump_cmd(dir.path())
            .args(["--path", "lib", "--no-such-flag"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
    }

    #[test]
    fn test_version_flag_exits_with_zero() {
        let output = Command::new(env!("CARGO_BIN_EXE_bump-version"))
            .arg("--version")
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success());
    }

    #[test]
    fn test_missing_mode_exits_with_one() {
        let (dir, _repo) = init_repo();
        let output = bump_cmd(dir.path())
            .args(["--path", "lib"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
    }

    #[test]
    fn test_missing_target_file_exits_with_one() {
        let (dir, repo) = init_repo();
        commit_file(&repo, "lib/a.rs", "1", "feat: x");

        let output = bump_cmd(dir.path())
            .args(["--path", "lib", "--tag-prefix", "lib/v"])
            .args(["--file", "lib/VERSION", "--type", "text"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
        assert!(!dir.path().join("lib/VERSION").exists());
    }

    #[test]
    fn test_no_change_prints_message() {
        let (dir, repo) = init_repo();
        commit_file(&repo, "lib/README.md", "docs", "chore: update docs");

        let output = bump_cmd(dir.path())
            .args(["--path", "lib", "--tag-prefix", "lib/v"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.contains("No changes requiring version bump."));
    }

    #[test]
    fn test_tag_mode_writes_ci_outputs_and_file() {
        let (dir, repo) = init_repo();
        let c1 = commit_file(&repo, "lib/VERSION", "1.1.0", "chore: release");
        lightweight_tag(&repo, "lib/v1.1.0", c1);
        commit_file(&repo, "lib/a.rs", "x", "fix(lib): off by one");

        let ci_file = dir.path().join("gh-output");
        fs::write(&ci_file, "").unwrap();

        let output = bump_cmd(dir.path())
            .args(["--path", "lib", "--tag-prefix", "lib/v"])
            .args(["--file", "lib/VERSION", "--type", "text"])
            .args(["--prerelease-suffix", "-rc.1"])
            .env("GITHUB_OUTPUT", &ci_file)
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.contains("Detected"));
        assert_eq!(
            fs::read_to_string(dir.path().join("lib/VERSION")).unwrap(),
            "1.1.1-rc.1"
        );
        assert_eq!(
            fs::read_to_string(&ci_file).unwrap(),
            "new_version=1.1.1-rc.1\nnew_tag=lib/v1.1.1-rc.1\nbumped=true\n"
        );
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let (dir, repo) = init_repo();
        commit_file(&repo, "pkg/VERSION", "0.3.0", "chore: release");
        commit_file(&repo, "pkg/x.rs", "x", "feat: new thing");

        let output = bump_cmd(dir.path())
            .args(["--path", "pkg", "--file", "pkg/VERSION", "--type", "text"])
            .arg("--dry-run")
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(
            fs::read_to_string(dir.path().join("pkg/VERSION")).unwrap(),
            "0.3.0"
        );
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.contains("0.4.0"));
    }
}
