#[cfg(test)]
mod tests {
    use crate::branch::BranchMode;
    use crate::config::Func;
    use crate::config_manager::ConfigManager;
    use crate::error::FsError;
    use crate::ops::{to_errno, UnionFs};
    use crate::policy::Policy;
    use crate::test_utils::{ctx, set_space, TestBranches};
    use nix::errno::Errno;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_lus_scenario_through_control_interface() {
        let setup = TestBranches::new(&[
            BranchMode::ReadWrite,
            BranchMode::ReadWrite,
            BranchMode::ReadOnly,
        ]);
        set_space(&setup.path(0), 10, 100, false);
        set_space(&setup.path(1), 10, 50, false);
        set_space(&setup.path(2), 90, 10, false);
        let config = setup.config();
        let manager = ConfigManager::new(config.clone());
        manager.set_option("user.mergerfs.func.mkdir", "lus").unwrap();
        let fs = UnionFs::new(config.clone());

        let chosen = {
            let config = config.read();
            config
                .func
                .get(Func::Mkdir)
                .create(&config.branches, Path::new("/"))
                .unwrap()
        };
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].path, setup.path(1));

        fs.mkdir(&ctx(), Path::new("/new"), 0o755).unwrap();
        assert!(setup.exists(1, "new"));
        assert!(!setup.exists(0, "new"));
        assert!(!setup.exists(2, "new"));
    }

    #[test]
    fn test_minfreespace_applies_to_branches_added_later() {
        let setup = TestBranches::rw(2);
        set_space(&setup.path(0), 5, 95, false);
        set_space(&setup.path(1), 50, 50, false);
        let config = setup.config();
        let manager = ConfigManager::new(config.clone());
        manager.set_option("minfreespace", "10M").unwrap();
        manager
            .set_option(
                "branches",
                &format!("{}:{}", setup.path(0).display(), setup.path(1).display()),
            )
            .unwrap();
        manager.set_option("func.mkdir", "ff").unwrap();
        let fs = UnionFs::new(config);

        fs.mkdir(&ctx(), Path::new("/d"), 0o755).unwrap();

        assert!(!setup.exists(0, "d"));
        assert!(setup.exists(1, "d"));
    }

    #[test]
    fn test_erofs_category_rejects_mutations() {
        let setup = TestBranches::rw(1);
        setup.mkdir(0, "d");
        let config = setup.config();
        ConfigManager::new(config.clone())
            .set_option("category.action", "erofs")
            .unwrap();
        let fs = UnionFs::new(config);

        let result = fs.rmdir(&ctx(), Path::new("/d"));
        assert_eq!(to_errno(&result), -(Errno::EROFS as i32));
        assert!(setup.exists(0, "d"));
    }

    #[test]
    fn test_policy_changes_take_effect_immediately() {
        let setup = TestBranches::rw(2);
        set_space(&setup.path(0), 10, 90, false);
        set_space(&setup.path(1), 90, 10, false);
        let (config, fs) = setup.union_fs();

        config.write().func.set(Func::Mkdir, Policy::Lfs);
        fs.mkdir(&ctx(), Path::new("/a"), 0o755).unwrap();
        config.write().func.set(Func::Mkdir, Policy::Mfs);
        fs.mkdir(&ctx(), Path::new("/b"), 0o755).unwrap();

        assert!(setup.exists(0, "a"));
        assert!(setup.exists(1, "b"));
    }

    #[test]
    fn test_read_handle_sees_stable_branches_during_reconfiguration() {
        let setup = TestBranches::rw(2);
        setup.touch(0, "f");
        setup.touch(1, "f");
        let spec_a = setup.path(0).display().to_string();
        let spec_both = format!("{}:{}", spec_a, setup.path(1).display());
        let (config, fs) = setup.union_fs();

        let writer = {
            let manager = ConfigManager::new(config.clone());
            thread::spawn(move || {
                for i in 0..200 {
                    let value = if i % 2 == 0 { &spec_a } else { &spec_both };
                    manager.set_option("branches", value).unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let config = config.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        let config = config.read();
                        let before = config.branches.snapshot();
                        let first = Policy::EpAll
                            .search(&config.branches, Path::new("/f"))
                            .unwrap();
                        thread::yield_now();
                        let second = Policy::EpAll
                            .search(&config.branches, Path::new("/f"))
                            .unwrap();
                        assert_eq!(before, config.branches.snapshot());
                        assert_eq!(first, second);
                        assert_eq!(first.len(), before.len());
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        let result = fs.unlink(&ctx(), Path::new("/f"));
        assert_eq!(result, Ok(()));
        assert!(!setup.exists(0, "f"));
        assert!(!setup.exists(1, "f"));
    }

    #[test]
    fn test_branch_change_waits_for_read_handle() {
        let setup = TestBranches::rw(2);
        let only_first = setup.path(0).display().to_string();
        let config = setup.config();
        let done = Arc::new(AtomicBool::new(false));

        let guard = config.read();
        let writer = {
            let manager = ConfigManager::new(config.clone());
            let done = Arc::clone(&done);
            thread::spawn(move || {
                manager.set_option("branches", &only_first).unwrap();
                done.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!done.load(Ordering::SeqCst));
        assert_eq!(guard.branches.len(), 2);
        drop(guard);

        writer.join().unwrap();
        assert!(done.load(Ordering::SeqCst));
        assert_eq!(config.read().branches.len(), 1);
    }

    #[test]
    fn test_no_targets_maps_to_eio() {
        assert_eq!(to_errno(&Err(FsError::NoTargets)), -(Errno::EIO as i32));
    }
}
