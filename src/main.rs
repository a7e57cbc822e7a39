use std::env;
use std::path::Path;
use std::process;

use mergerfs_core::config::{create_config, Category, ConfigRef, Func};
use mergerfs_core::config_manager::ConfigManager;
use mergerfs_core::ops::{to_errno, RequestContext, UnionFs};

fn usage(program: &str) {
    println!("mergerfs-core - union filesystem branch policies");
    println!();
    println!("Usage: {} [-o key=value[,key=value...]] <branches> <command> [args]", program);
    println!();
    println!("Branches: PATH[=RW|RO|NC[,MINFREESPACE]] joined by ':'");
    println!();
    println!("Commands:");
    println!("  link FROM TO           Hard link FROM to TO");
    println!("  symlink TARGET LINK    Create LINK pointing at TARGET");
    println!("  mkdir PATH [MODE]      Create a directory (octal MODE, default 755)");
    println!("  rmdir PATH             Remove a directory from every branch");
    println!("  unlink PATH            Remove a file from every branch");
    println!("  policy FUNC PATH       Show the branches FUNC's policy selects for PATH");
    println!("  config                 Print every configuration option");
    println!();
    println!("Options are the runtime configuration keys, e.g.:");
    println!("  -o func.create=mfs,minfreespace=1G,category.action=epff");
    println!();
    println!("Example:");
    println!("  {} /mnt/a:/mnt/b=NC mkdir /photos", program);
    println!("  {} -o func.mkdir=lus /mnt/a:/mnt/b mkdir /photos", program);
}

fn apply_options(manager: &ConfigManager, options: &str) {
    if let Err(e) = manager.apply_options(options) {
        eprintln!("Error: Options '{}': {}", options, e);
        process::exit(1);
    }
}

fn show_policy(config: &ConfigRef, func: &str, path: &Path) -> i32 {
    let func: Func = match func.parse() {
        Ok(func) => func,
        Err(()) => {
            eprintln!("Error: Unknown function '{}'", func);
            return 1;
        }
    };

    let config = config.read();
    let policy = config.func.get(func);
    let result = match func.category() {
        Category::Action => policy.action(&config.branches, path),
        Category::Create => policy.create(&config.branches, path),
        Category::Search => policy.search(&config.branches, path),
    };

    match result {
        Ok(branches) => {
            for branch in branches {
                println!("{}", branch.path.display());
            }
            0
        }
        Err(e) => {
            eprintln!("{} ({}): {}", func.name(), policy, e);
            1
        }
    }
}

fn main() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mergerfs-core");

    let config = create_config();
    let manager = ConfigManager::new(config.clone());

    let mut i = 1;
    while i + 1 < args.len() && args[i] == "-o" {
        apply_options(&manager, &args[i + 1]);
        i += 2;
    }

    if i + 1 >= args.len() {
        usage(program);
        process::exit(1);
    }

    if let Err(e) = manager.set_option("branches", &args[i]) {
        eprintln!("Error: Invalid branches '{}': {}", args[i], e);
        process::exit(1);
    }
    for branch in config.read().branches.snapshot() {
        if !branch.path.exists() {
            eprintln!("Error: Branch directory {} does not exist", branch.path.display());
            process::exit(1);
        }
    }

    let command = args[i + 1].as_str();
    let rest = &args[i + 2..];
    let fs = UnionFs::new(config.clone());
    let ctx = RequestContext::current();

    let result = match (command, rest) {
        ("link", [from, to]) => fs.link(&ctx, Path::new(from), Path::new(to)),
        ("symlink", [target, link]) => fs.symlink(&ctx, Path::new(target), Path::new(link)),
        ("mkdir", [path]) => fs.mkdir(&ctx, Path::new(path), 0o755),
        ("mkdir", [path, mode]) => match u32::from_str_radix(mode, 8) {
            Ok(mode) => fs.mkdir(&ctx, Path::new(path), mode),
            Err(_) => {
                eprintln!("Error: Invalid mode '{}'", mode);
                process::exit(1);
            }
        },
        ("rmdir", [path]) => fs.rmdir(&ctx, Path::new(path)),
        ("unlink", [path]) => fs.unlink(&ctx, Path::new(path)),
        ("policy", [func, path]) => process::exit(show_policy(&config, func, Path::new(path))),
        ("config", []) => {
            for name in manager.list_options() {
                if let Ok(value) = manager.get_option(&name) {
                    println!("{}={}", name, value);
                }
            }
            return;
        }
        _ => {
            usage(program);
            process::exit(1);
        }
    };

    let errno = to_errno(&result);
    match result {
        Ok(()) => tracing::info!("{} succeeded", command),
        Err(e) => {
            eprintln!("Error: {}: {}", command, e);
            process::exit(-errno);
        }
    }
}
