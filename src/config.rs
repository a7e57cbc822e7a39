use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::branch::Branches;
use crate::policy::Policy;

pub type ConfigRef = Arc<RwLock<Config>>;

pub const DEFAULT_MIN_FREE_SPACE: u64 = 4 * 1024 * 1024 * 1024;

/// Which role a function's policy plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Action,
    Create,
    Search,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Action, Category::Create, Category::Search];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Action => "action",
            Category::Create => "create",
            Category::Search => "search",
        }
    }

    pub fn default_policy(&self) -> Policy {
        match self {
            Category::Action => Policy::EpAll,
            Category::Create => Policy::EpMfs,
            Category::Search => Policy::Ff,
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or(())
    }
}

const FUNC_COUNT: usize = 20;

/// Filesystem functions whose branch selection is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Access,
    Chmod,
    Chown,
    Create,
    Getattr,
    Getxattr,
    Link,
    Listxattr,
    Mkdir,
    Mknod,
    Open,
    Readlink,
    Removexattr,
    Rename,
    Rmdir,
    Setxattr,
    Symlink,
    Truncate,
    Unlink,
    Utimens,
}

impl Func {
    pub const ALL: [Func; FUNC_COUNT] = [
        Func::Access,
        Func::Chmod,
        Func::Chown,
        Func::Create,
        Func::Getattr,
        Func::Getxattr,
        Func::Link,
        Func::Listxattr,
        Func::Mkdir,
        Func::Mknod,
        Func::Open,
        Func::Readlink,
        Func::Removexattr,
        Func::Rename,
        Func::Rmdir,
        Func::Setxattr,
        Func::Symlink,
        Func::Truncate,
        Func::Unlink,
        Func::Utimens,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Func::Access => "access",
            Func::Chmod => "chmod",
            Func::Chown => "chown",
            Func::Create => "create",
            Func::Getattr => "getattr",
            Func::Getxattr => "getxattr",
            Func::Link => "link",
            Func::Listxattr => "listxattr",
            Func::Mkdir => "mkdir",
            Func::Mknod => "mknod",
            Func::Open => "open",
            Func::Readlink => "readlink",
            Func::Removexattr => "removexattr",
            Func::Rename => "rename",
            Func::Rmdir => "rmdir",
            Func::Setxattr => "setxattr",
            Func::Symlink => "symlink",
            Func::Truncate => "truncate",
            Func::Unlink => "unlink",
            Func::Utimens => "utimens",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Func::Chmod
            | Func::Chown
            | Func::Link
            | Func::Removexattr
            | Func::Rename
            | Func::Rmdir
            | Func::Setxattr
            | Func::Truncate
            | Func::Unlink
            | Func::Utimens => Category::Action,
            Func::Create | Func::Mkdir | Func::Mknod | Func::Symlink => Category::Create,
            Func::Access
            | Func::Getattr
            | Func::Getxattr
            | Func::Listxattr
            | Func::Open
            | Func::Readlink => Category::Search,
        }
    }
}

impl FromStr for Func {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Func::ALL.iter().copied().find(|f| f.name() == s).ok_or(())
    }
}

/// The policy bound to every function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Funcs {
    policies: [Policy; FUNC_COUNT],
}

impl Funcs {
    pub fn get(&self, func: Func) -> Policy {
        self.policies[func as usize]
    }

    pub fn set(&mut self, func: Func, policy: Policy) {
        self.policies[func as usize] = policy;
    }

    /// Bind `policy` to every function of `category`.
    pub fn set_category(&mut self, category: Category, policy: Policy) {
        for func in Func::ALL.iter().filter(|f| f.category() == category) {
            self.set(*func, policy);
        }
    }

    /// The policy shared by every function of `category`, if they agree.
    pub fn category_policy(&self, category: Category) -> Option<Policy> {
        let mut policies = Func::ALL
            .iter()
            .filter(|f| f.category() == category)
            .map(|f| self.get(*f));
        let first = policies.next()?;
        policies.all(|p| p == first).then_some(first)
    }
}

impl Default for Funcs {
    fn default() -> Self {
        let mut policies = [Policy::Ff; Func::ALL.len()];
        for func in Func::ALL {
            policies[func as usize] = func.category().default_policy();
        }
        Self { policies }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub branches: Branches,
    pub func: Funcs,
    /// Threshold given to branches declared without their own.
    pub minfreespace: u64,
    /// Use the create-path variant of link even when the create policy is
    /// path preserving.
    pub ignorepponrename: bool,
    pub fsname: String,
    pub mountpoint: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branches: Branches::default(),
            func: Funcs::default(),
            minfreespace: DEFAULT_MIN_FREE_SPACE,
            ignorepponrename: false,
            fsname: "mergerfs".to_string(),
            mountpoint: PathBuf::from("/mnt/mergerfs"),
        }
    }
}

pub fn create_config() -> ConfigRef {
    Arc::new(RwLock::new(Config::default()))
}

/// Parse a byte count with an optional `K`, `M`, `G` or `T` suffix.
pub fn parse_size(value: &str) -> Option<u64> {
    let value = value.trim();
    let (digits, shift) = match value.chars().last()?.to_ascii_uppercase() {
        'K' => (&value[..value.len() - 1], 10),
        'M' => (&value[..value.len() - 1], 20),
        'G' => (&value[..value.len() - 1], 30),
        'T' => (&value[..value.len() - 1], 40),
        _ => (value, 0),
    };
    digits.parse::<u64>().ok()?.checked_mul(1u64 << shift)
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let funcs = Funcs::default();
        assert_eq!(funcs.get(Func::Link), Policy::EpAll);
        assert_eq!(funcs.get(Func::Rmdir), Policy::EpAll);
        assert_eq!(funcs.get(Func::Symlink), Policy::EpMfs);
        assert_eq!(funcs.get(Func::Mkdir), Policy::EpMfs);
        assert_eq!(funcs.get(Func::Getattr), Policy::Ff);
    }

    #[test]
    fn test_set_category() {
        let mut funcs = Funcs::default();
        funcs.set_category(Category::Create, Policy::Lus);
        assert_eq!(funcs.get(Func::Create), Policy::Lus);
        assert_eq!(funcs.get(Func::Symlink), Policy::Lus);
        assert_eq!(funcs.get(Func::Unlink), Policy::EpAll);
        assert_eq!(funcs.category_policy(Category::Create), Some(Policy::Lus));

        funcs.set(Func::Mkdir, Policy::Mfs);
        assert_eq!(funcs.category_policy(Category::Create), None);
    }

    #[test]
    fn test_func_names() {
        for func in Func::ALL {
            assert_eq!(func.name().parse::<Func>(), Ok(func));
        }
        assert!("fallocate".parse::<Func>().is_err());
        assert_eq!("search".parse::<Category>(), Ok(Category::Search));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("100"), Some(100));
        assert_eq!(parse_size("4K"), Some(4096));
        assert_eq!(parse_size("1m"), Some(1024 * 1024));
        assert_eq!(parse_size("4G"), Some(DEFAULT_MIN_FREE_SPACE));
        assert_eq!(parse_size("2T"), Some(2 << 40));
        assert_eq!(parse_size(""), None);
        assert_eq!(parse_size("G"), None);
        assert_eq!(parse_size("lots"), None);
        assert_eq!(parse_size("99999999999T"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("On"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
