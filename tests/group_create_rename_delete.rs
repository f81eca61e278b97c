//! Group block creation, renaming and deletion.

mod common;

use hostman::line::LEGACY_SEPARATOR;
use hostman::HostsError;

#[test]
fn create_appends_empty_block() {
    let dir = common::temp_home();
    let hosts = common::hosts_with(dir.path(), "127.0.0.1\tlocalhost\n");

    hosts.create_group("Staging").unwrap();

    assert_eq!(
        common::read_hosts(dir.path()),
        "127.0.0.1\tlocalhost\n\n---[Staging]---\n\n---[>Staging<]---\n"
    );
    let staging = hosts
        .list_groups()
        .unwrap()
        .into_iter()
        .find(|g| g.name == "Staging")
        .unwrap();
    assert!(staging.members.is_empty());
    assert_eq!(staging.active_count, 0);
}

#[test]
fn create_twice_fails() {
    let dir = common::temp_home();
    let hosts = common::hosts_with(dir.path(), "");

    hosts.create_group("X").unwrap();
    let before = common::read_hosts(dir.path());
    let err = hosts.create_group("X").unwrap_err();
    assert!(matches!(err, HostsError::GroupExists(_)));
    assert_eq!(common::read_hosts(dir.path()), before);
}

#[test]
fn create_then_add_lands_inside_block() {
    let dir = common::temp_home();
    let hosts = common::hosts_with(dir.path(), "127.0.0.1\tlocalhost\n");

    hosts.create_group("Staging").unwrap();
    hosts.add_host("10.1.1.1", "api.staging", None, Some("Staging")).unwrap();

    let groups = hosts.list_groups().unwrap();
    let staging = groups.iter().find(|g| g.name == "Staging").unwrap();
    assert_eq!(staging.members.len(), 1);
    assert_eq!(staging.members[0].domain, "api.staging");
}

#[test]
fn create_rejects_marker_characters() {
    let dir = common::temp_home();
    let hosts = common::hosts_with(dir.path(), "");

    let err = hosts.create_group("a>b").unwrap_err();
    assert!(matches!(err, HostsError::InvalidArgument(_)));
}

#[test]
fn rename_rewrites_both_markers() {
    let dir = common::temp_home();
    let hosts = common::hosts_with(dir.path(), common::WORK_HOSTS);

    hosts.rename_group("Work", "Office").unwrap();

    assert_eq!(
        common::read_hosts(dir.path()),
        "127.0.0.1\tlocalhost\n---[Office]---\n10.0.0.1\tintra.work\n---[>Office<]---\n"
    );
    let records = hosts.list_hosts().unwrap();
    assert_eq!(records[1].group, "Office");
}

#[test]
fn rename_legacy_block_only_touches_start() {
    let dir = common::temp_home();
    let content = format!("---[Old]---\n1.1.1.1 a.test\n{LEGACY_SEPARATOR}\n");
    let hosts = common::hosts_with(dir.path(), &content);

    hosts.rename_group("Old", "New").unwrap();

    assert_eq!(
        common::read_hosts(dir.path()),
        format!("---[New]---\n1.1.1.1 a.test\n{LEGACY_SEPARATOR}\n")
    );
}

#[test]
fn rename_errors() {
    let dir = common::temp_home();
    let hosts = common::hosts_with(dir.path(), common::WORK_HOSTS);

    let err = hosts.rename_group("Work", "   ").unwrap_err();
    assert!(matches!(err, HostsError::InvalidArgument(_)));
    let err = hosts.rename_group("Nope", "Other").unwrap_err();
    assert!(matches!(err, HostsError::GroupNotFound(_)));
    assert_eq!(common::read_hosts(dir.path()), common::WORK_HOSTS);
}

#[test]
fn delete_removes_block_and_contents() {
    let dir = common::temp_home();
    let content = "127.0.0.1\tlocalhost\n\
---[Work]---\n\
10.0.0.1\tintra.work\n\
free text that is not a host\n\
# a comment\n\
---[>Work<]---\n\
192.168.0.1\trouter.lan\n";
    let hosts = common::hosts_with(dir.path(), content);

    hosts.delete_group("Work").unwrap();

    assert_eq!(
        common::read_hosts(dir.path()),
        "127.0.0.1\tlocalhost\n192.168.0.1\trouter.lan\n"
    );
    assert!(!hosts.list_groups().unwrap().iter().any(|g| g.name == "Work"));
}

#[test]
fn delete_stops_at_legacy_separator() {
    let dir = common::temp_home();
    let content = format!("---[Old]---\n1.1.1.1 a.test\n{LEGACY_SEPARATOR}\n2.2.2.2 b.test\n");
    let hosts = common::hosts_with(dir.path(), &content);

    hosts.delete_group("Old").unwrap();

    assert_eq!(common::read_hosts(dir.path()), "2.2.2.2 b.test\n");
}

#[test]
fn delete_unterminated_block_runs_to_end() {
    let dir = common::temp_home();
    let hosts = common::hosts_with(dir.path(), "1.1.1.1 a.test\n---[Open]---\n2.2.2.2 b.test\n");

    hosts.delete_group("Open").unwrap();

    assert_eq!(common::read_hosts(dir.path()), "1.1.1.1 a.test");
}

#[test]
fn delete_missing_group_fails() {
    let dir = common::temp_home();
    let hosts = common::hosts_with(dir.path(), common::WORK_HOSTS);

    let err = hosts.delete_group("Nope").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(common::read_hosts(dir.path()), common::WORK_HOSTS);
}
