use crate::branch::Branch;
use crate::config::{parse_bool, parse_size, Category, Config, ConfigRef, Func};
use crate::policy::Policy;
use nix::errno::Errno;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

const PREFIX: &str = "user.mergerfs.";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Option not found")]
    NotFound,
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Read-only option")]
    ReadOnly,
    #[error("Operation not supported")]
    NotSupported,
}

impl ConfigError {
    pub fn errno(&self) -> i32 {
        match self {
            ConfigError::NotFound => Errno::ENODATA as i32,
            ConfigError::InvalidValue(_) => Errno::EINVAL as i32,
            ConfigError::ReadOnly => Errno::EROFS as i32,
            ConfigError::NotSupported => Errno::ENOTSUP as i32,
        }
    }
}

/// A configuration key that can be read and written at runtime.
pub trait ConfigOption: Send + Sync {
    fn get_value(&self, config: &ConfigRef) -> Result<String, ConfigError>;

    fn set_value(&self, config: &ConfigRef, value: &str) -> Result<(), ConfigError>;

    fn is_readonly(&self) -> bool {
        false
    }

    fn help(&self) -> &str;
}

/// Textual get/set access to a live [`Config`].
pub struct ConfigManager {
    options: HashMap<String, Box<dyn ConfigOption>>,
    config: ConfigRef,
}

impl ConfigManager {
    pub fn new(config: ConfigRef) -> Self {
        let mut options: HashMap<String, Box<dyn ConfigOption>> = HashMap::new();

        options.insert("branches".to_string(), Box::new(BranchesOption));
        options.insert("minfreespace".to_string(), Box::new(MinFreeSpaceOption));
        options.insert(
            "ignorepponrename".to_string(),
            Box::new(BooleanOption {
                get: |c| c.ignorepponrename,
                set: |c, v| c.ignorepponrename = v,
                help: "Ignore path preserving create policies when linking",
            }),
        );
        options.insert(
            "fsname".to_string(),
            Box::new(StringOption {
                get: |c| c.fsname.clone(),
                set: |c, v| c.fsname = v.to_string(),
                help: "Filesystem name",
            }),
        );
        options.insert(
            "mountpoint".to_string(),
            Box::new(StringOption {
                get: |c| c.mountpoint.display().to_string(),
                set: |c, v| c.mountpoint = PathBuf::from(v),
                help: "Where the union is mounted",
            }),
        );

        for func in Func::ALL {
            options.insert(format!("func.{}", func.name()), Box::new(FuncOption(func)));
        }
        for category in Category::ALL {
            options.insert(
                format!("category.{}", category.name()),
                Box::new(CategoryOption(category)),
            );
        }

        options.insert(
            "version".to_string(),
            Box::new(ReadOnlyOption {
                value: env!("CARGO_PKG_VERSION").to_string(),
                help: "mergerfs-core version",
            }),
        );
        options.insert(
            "pid".to_string(),
            Box::new(ReadOnlyOption {
                value: std::process::id().to_string(),
                help: "Process ID",
            }),
        );

        Self { options, config }
    }

    /// All option names with the "user.mergerfs." prefix, sorted.
    pub fn list_options(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .options
            .keys()
            .map(|k| format!("{}{}", PREFIX, k))
            .collect();
        names.sort();
        names
    }

    pub fn get_option(&self, name: &str) -> Result<String, ConfigError> {
        self.lookup(name)?.get_value(&self.config)
    }

    pub fn set_option(&self, name: &str, value: &str) -> Result<(), ConfigError> {
        let option = self.lookup(name)?;
        if option.is_readonly() {
            return Err(ConfigError::ReadOnly);
        }
        option.set_value(&self.config, value)?;
        tracing::info!("Set {} to {}", name, value);
        Ok(())
    }

    /// Apply a `key=value[,key=value...]` list. A `,` only starts a new
    /// option when what follows names a known key, so values such as
    /// `branches=/a=RW,1G:/b` keep their own commas. A bare key means `true`.
    pub fn apply_options(&self, options: &str) -> Result<(), ConfigError> {
        let mut pairs: Vec<String> = Vec::new();
        for token in options.split(',') {
            let key = token.split_once('=').map_or(token, |(k, _)| k);
            match pairs.last_mut() {
                Some(last) if self.lookup(key).is_err() => {
                    last.push(',');
                    last.push_str(token);
                }
                _ if token.is_empty() => {}
                _ => pairs.push(token.to_string()),
            }
        }

        for pair in &pairs {
            let (key, value) = pair.split_once('=').unwrap_or((pair.as_str(), "true"));
            self.set_option(key, value)?;
        }
        Ok(())
    }

    pub fn help(&self, name: &str) -> Result<&str, ConfigError> {
        Ok(self.lookup(name)?.help())
    }

    fn lookup(&self, name: &str) -> Result<&dyn ConfigOption, ConfigError> {
        let name = name.strip_prefix(PREFIX).unwrap_or(name);
        self.options
            .get(name)
            .map(|option| option.as_ref())
            .ok_or(ConfigError::NotFound)
    }
}

/// Branch list. Accepts `PATHS` or `=PATHS` to replace, `+<PATHS` to
/// prepend, `+>PATHS` or `+PATHS` to append and `-PATHS` to remove.
struct BranchesOption;

impl ConfigOption for BranchesOption {
    fn get_value(&self, config: &ConfigRef) -> Result<String, ConfigError> {
        Ok(config.read().branches.to_string())
    }

    fn set_value(&self, config: &ConfigRef, value: &str) -> Result<(), ConfigError> {
        // Exclusive so no in-flight request sees the list change under it.
        let config = config.write();
        let parse = |specs: &str| {
            Branch::parse_list(specs, config.minfreespace)
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))
        };

        if let Some(rest) = value.strip_prefix("+<") {
            config.branches.push_front(parse(rest)?);
        } else if let Some(rest) = value.strip_prefix("+>") {
            config.branches.push_back(parse(rest)?);
        } else if let Some(rest) = value.strip_prefix('+') {
            config.branches.push_back(parse(rest)?);
        } else if let Some(rest) = value.strip_prefix('-') {
            for branch in parse(rest)? {
                if !config.branches.remove(&branch.path) {
                    tracing::debug!("No branch at {:?} to remove", branch.path);
                }
            }
        } else {
            let rest = value.strip_prefix('=').unwrap_or(value);
            config.branches.set(parse(rest)?);
        }
        Ok(())
    }

    fn help(&self) -> &str {
        "Branch list: PATH[=RW|RO|NC[,MINFREESPACE]] joined by ':'"
    }
}

struct MinFreeSpaceOption;

impl ConfigOption for MinFreeSpaceOption {
    fn get_value(&self, config: &ConfigRef) -> Result<String, ConfigError> {
        Ok(config.read().minfreespace.to_string())
    }

    fn set_value(&self, config: &ConfigRef, value: &str) -> Result<(), ConfigError> {
        let size = parse_size(value)
            .ok_or_else(|| ConfigError::InvalidValue(format!("Invalid size: {}", value)))?;
        config.write().minfreespace = size;
        Ok(())
    }

    fn help(&self) -> &str {
        "Default minimum free space for new files, applied to branches added without one"
    }
}

struct BooleanOption {
    get: fn(&Config) -> bool,
    set: fn(&mut Config, bool),
    help: &'static str,
}

impl ConfigOption for BooleanOption {
    fn get_value(&self, config: &ConfigRef) -> Result<String, ConfigError> {
        Ok((self.get)(&config.read()).to_string())
    }

    fn set_value(&self, config: &ConfigRef, value: &str) -> Result<(), ConfigError> {
        let value = parse_bool(value).ok_or_else(|| {
            ConfigError::InvalidValue(format!(
                "Invalid boolean value: {}. Use true/false, 1/0, yes/no, or on/off",
                value
            ))
        })?;
        (self.set)(&mut config.write(), value);
        Ok(())
    }

    fn help(&self) -> &str {
        self.help
    }
}

struct StringOption {
    get: fn(&Config) -> String,
    set: fn(&mut Config, &str),
    help: &'static str,
}

impl ConfigOption for StringOption {
    fn get_value(&self, config: &ConfigRef) -> Result<String, ConfigError> {
        Ok((self.get)(&config.read()))
    }

    fn set_value(&self, config: &ConfigRef, value: &str) -> Result<(), ConfigError> {
        (self.set)(&mut config.write(), value);
        Ok(())
    }

    fn help(&self) -> &str {
        self.help
    }
}

fn parse_policy(value: &str) -> Result<Policy, ConfigError> {
    value
        .parse::<Policy>()
        .map_err(|e| ConfigError::InvalidValue(e.to_string()))
}

struct FuncOption(Func);

impl ConfigOption for FuncOption {
    fn get_value(&self, config: &ConfigRef) -> Result<String, ConfigError> {
        Ok(config.read().func.get(self.0).to_string())
    }

    fn set_value(&self, config: &ConfigRef, value: &str) -> Result<(), ConfigError> {
        let policy = parse_policy(value)?;
        config.write().func.set(self.0, policy);
        Ok(())
    }

    fn help(&self) -> &str {
        match self.0.category() {
            Category::Action => "Action policy for this function",
            Category::Create => "Create policy for this function",
            Category::Search => "Search policy for this function",
        }
    }
}

/// Sets every function of a category. Reads back the shared policy, or the
/// distinct policies in use joined by ',' when they differ.
struct CategoryOption(Category);

impl ConfigOption for CategoryOption {
    fn get_value(&self, config: &ConfigRef) -> Result<String, ConfigError> {
        let config = config.read();
        if let Some(policy) = config.func.category_policy(self.0) {
            return Ok(policy.to_string());
        }

        let mut names: Vec<&str> = Func::ALL
            .iter()
            .filter(|f| f.category() == self.0)
            .map(|f| config.func.get(*f).name())
            .collect();
        names.sort_unstable();
        names.dedup();
        Ok(names.join(","))
    }

    fn set_value(&self, config: &ConfigRef, value: &str) -> Result<(), ConfigError> {
        let policy = parse_policy(value)?;
        config.write().func.set_category(self.0, policy);
        Ok(())
    }

    fn help(&self) -> &str {
        "Policy for every function in this category"
    }
}

struct ReadOnlyOption {
    value: String,
    help: &'static str,
}

impl ConfigOption for ReadOnlyOption {
    fn get_value(&self, _config: &ConfigRef) -> Result<String, ConfigError> {
        Ok(self.value.clone())
    }

    fn set_value(&self, _config: &ConfigRef, _value: &str) -> Result<(), ConfigError> {
        Err(ConfigError::ReadOnly)
    }

    fn is_readonly(&self) -> bool {
        true
    }

    fn help(&self) -> &str {
        self.help
    }
}
