use std::error::Error;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store_io::{NamePurpose, TaskStore};
use crate::model::config::{Config, View};
use crate::model::task::Priority;
use crate::model::task_list::TaskList;
use crate::ops::{search, task_ops};

type CmdResult = Result<(), Box<dyn Error>>;

/// Shared state for a single command invocation
struct Ctx {
    store: TaskStore,
    config: Config,
    json: bool,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let config = config_io::read_config();
    let dir = config_io::resolve_store_dir(cli.dir.as_deref(), &config);
    let mut ctx = Ctx {
        store: TaskStore::new(dir),
        config,
        json: cli.json,
    };

    match cli.command {
        // Read commands
        Commands::List(args) => cmd_list(&mut ctx, args),
        Commands::Show(args) => cmd_show(&mut ctx, args),
        Commands::Search(args) => cmd_search(&mut ctx, args),
        Commands::Files => cmd_files(&ctx),

        // Write commands
        Commands::Add(args) => cmd_add(&mut ctx, args),
        Commands::Modify(args) => cmd_modify(&mut ctx, args),
        Commands::Rm(args) => cmd_rm(&mut ctx, args),
        Commands::Cp(args) => cmd_cp(&mut ctx, args),
        Commands::Delete(args) => cmd_delete(&mut ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load `name` if it exists, otherwise start an empty list.
/// The name is still checked, so a bad name fails before anything is written.
fn load_or_new(store: &mut TaskStore, name: &str) -> Result<TaskList, Box<dyn Error>> {
    store.validate_name(name, NamePurpose::Save)?;
    if store.validate_name(name, NamePurpose::Load).is_ok() {
        Ok(store.load(name)?)
    } else {
        Ok(TaskList::new())
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &mut Ctx, args: ListArgs) -> CmdResult {
    let list = ctx.store.load(&args.list)?;
    let by_priority = if args.by_priority {
        true
    } else if args.by_number {
        false
    } else {
        ctx.config.display.view == View::Priority
    };

    if by_priority {
        let buckets = search::list_by_priority(&list);
        if ctx.json {
            return print_json(&buckets_to_json(&buckets));
        }
        if list.is_empty() {
            println!("{}", format_task_list(list.tasks()));
        } else {
            println!("{}", format_by_priority(&buckets));
        }
    } else if ctx.json {
        let tasks: Vec<TaskJson> = list.tasks().iter().map(task_to_json).collect();
        print_json(&tasks)?;
    } else {
        println!("{}", format_task_list(list.tasks()));
    }
    Ok(())
}

fn cmd_show(ctx: &mut Ctx, args: ShowArgs) -> CmdResult {
    let list = ctx.store.load(&args.list)?;
    let id = task_ops::parse_id(&list, &args.id)?;
    let task = task_ops::find_task(&list, id)?;
    if ctx.json {
        print_json(&task_to_json(task))
    } else {
        println!("{}", format_task(task));
        Ok(())
    }
}

fn cmd_search(ctx: &mut Ctx, args: SearchArgs) -> CmdResult {
    let list = ctx.store.load(&args.list)?;
    let hits = search::search_with_fields(&list, &args.query);

    if ctx.json {
        let results: Vec<SearchHitJson> = hits
            .iter()
            .map(|(task, fields)| search_hit_to_json(task, fields))
            .collect();
        return print_json(&results);
    }

    if hits.is_empty() {
        println!("{}", format_no_matches(&args.query));
    } else {
        println!("{}", format_task_list(hits.iter().map(|(task, _)| *task)));
    }
    Ok(())
}

fn cmd_files(ctx: &Ctx) -> CmdResult {
    let names = ctx.store.list_files()?;
    if ctx.json {
        return print_json(&names);
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &mut Ctx, args: AddArgs) -> CmdResult {
    let priority: Priority = args.priority.parse()?;
    let mut list = load_or_new(&mut ctx.store, &args.list)?;
    let task = task_ops::add_task(&mut list, args.note, priority, args.tags);
    ctx.store.save(&list, &args.list)?;

    if ctx.json {
        print_json(&task_to_json(&task))
    } else {
        println!("{}", task.id);
        Ok(())
    }
}

fn cmd_modify(ctx: &mut Ctx, args: ModifyArgs) -> CmdResult {
    let mut list = ctx.store.load(&args.list)?;
    let id = task_ops::parse_id(&list, &args.id)?;
    let current = task_ops::find_task(&list, id)?.clone();

    let priority = match args.priority {
        Some(p) => p.parse()?,
        None => current.priority,
    };
    let note = args.note.unwrap_or(current.note);
    let tags = args.tags.unwrap_or(current.tags);

    let task = task_ops::modify_task(&mut list, id, note, priority, tags)?.clone();
    ctx.store.save(&list, &args.list)?;

    if ctx.json {
        print_json(&task_to_json(&task))
    } else {
        println!("{}", format_task(&task));
        Ok(())
    }
}

fn cmd_rm(ctx: &mut Ctx, args: RmArgs) -> CmdResult {
    let mut list = ctx.store.load(&args.list)?;
    let id = task_ops::parse_id(&list, &args.id)?;
    let removed = task_ops::delete_task(&mut list, id)?;
    ctx.store.save(&list, &args.list)?;

    if ctx.json {
        print_json(&task_to_json(&removed))
    } else {
        println!("Removed task {}: {}", id, removed.note);
        Ok(())
    }
}

fn cmd_cp(ctx: &mut Ctx, args: CpArgs) -> CmdResult {
    let list = ctx.store.load(&args.from)?;
    let path = ctx.store.save(&list, &args.to)?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_delete(ctx: &mut Ctx, args: DeleteArgs) -> CmdResult {
    let path = ctx.store.path_for(&args.list)?;
    ctx.store.delete(&args.list)?;
    println!("Deleted {}", path.display());
    Ok(())
}
