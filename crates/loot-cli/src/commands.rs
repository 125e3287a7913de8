use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use loot_service::{
    AuditReport, CredentialRecord, FileBlob, LocalLootService, LootConfig, LootEntry, LootKind,
    Payload, StrayReason,
};
use serde::Serialize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.root.as_deref(), cli.config.as_deref())?;
    let svc = LocalLootService::open(&config)
        .with_context(|| format!("opening loot store at {}", config.root.display()))?;
    let format = cli.format;
    match cli.command {
        Command::Init(_) => cmd_init(&config, format),
        Command::Add(args) => cmd_add(&svc, args, format),
        Command::Get(args) => cmd_get(&svc, args, format),
        Command::Rm(args) => cmd_rm(&svc, args, format),
        Command::Ls(args) => cmd_ls(&svc, args, format),
        Command::Fsck(args) => cmd_fsck(&svc, args, format),
    }
}

/// `--root` wins over the config file, which wins over the defaults.
pub fn resolve_config(root: Option<&Path>, config: Option<&Path>) -> anyhow::Result<LootConfig> {
    let mut resolved = match config {
        Some(path) => LootConfig::load(path)?,
        None => LootConfig::default(),
    };
    if let Some(root) = root {
        resolved.root = root.to_path_buf();
    }
    Ok(resolved)
}

fn cmd_init(config: &LootConfig, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "root": config.root,
            "database": config.database_path(),
        })),
        OutputFormat::Text => {
            println!("{} Initialized loot store in {}", "✓".green().bold(), config.root.display().to_string().bold());
            println!("  Database: {}", config.database_path().display().to_string().cyan());
            Ok(())
        }
    }
}

fn cmd_add(svc: &LocalLootService, args: AddArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (kind, payload) = payload_from_args(&args)?;
    let entry = svc.add(&args.name, kind, payload)?;
    match format {
        OutputFormat::Json => print_json(&EntryView::from(&entry)),
        OutputFormat::Text => {
            println!("{} Added {} {}", "✓".green().bold(), entry.kind().to_string().cyan(), entry.name().bold());
            println!("  Id: {}", entry.id().to_string().yellow());
            Ok(())
        }
    }
}

/// Work out the entry kind and payload from the `add` flags.
///
/// An explicit `--kind` is passed through as-is; the service rejects it if
/// the payload belongs to the other kind.
fn payload_from_args(args: &AddArgs) -> anyhow::Result<(LootKind, Payload)> {
    let payload: Payload = if let Some(path) = &args.file {
        let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        FileBlob::new(name, data).into()
    } else if let (Some(user), Some(password)) = (&args.user, &args.password) {
        CredentialRecord::UserPassword {
            user: user.clone(),
            password: password.clone(),
        }
        .into()
    } else if let Some(key) = &args.api_key {
        CredentialRecord::ApiKey { key: key.clone() }.into()
    } else if let Some(path) = &args.raw {
        let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        CredentialRecord::Raw(data).into()
    } else {
        Payload::None
    };

    match (args.kind, payload.kind()) {
        (Some(kind), _) => Ok((kind, payload)),
        (None, Some(kind)) => Ok((kind, payload)),
        (None, None) => bail!("nothing to store: pass a payload flag or --kind for a metadata-only entry"),
    }
}

fn cmd_get(svc: &LocalLootService, args: GetArgs, format: OutputFormat) -> anyhow::Result<()> {
    let entry = svc.get(&args.id)?;

    if let Some(out) = &args.output {
        let Payload::File(file) = entry.payload() else {
            bail!("entry {} has no file data to write", entry.id());
        };
        std::fs::write(out, &file.data).with_context(|| format!("writing {}", out.display()))?;
    }

    match format {
        OutputFormat::Json => print_json(&EntryView::from(&entry)),
        OutputFormat::Text => {
            println!("{} {}", entry.kind().to_string().cyan().bold(), entry.id().to_string().yellow());
            println!("  Name:    {}", entry.name().bold());
            println!("  Created: {}", entry.created_at().to_rfc3339());
            match entry.payload() {
                Payload::None => println!("  Payload: {}", "none".dimmed()),
                Payload::File(file) => {
                    println!("  File:    {} ({} bytes)", file.name, file.size());
                    if let Some(out) = &args.output {
                        println!("  {} Written to {}", "✓".green(), out.display());
                    }
                }
                Payload::Credential(CredentialRecord::UserPassword { user, password }) => {
                    println!("  User:     {}", user.bold());
                    println!("  Password: {}", password.red());
                }
                Payload::Credential(CredentialRecord::ApiKey { key }) => {
                    println!("  API key: {}", key.red());
                }
                Payload::Credential(CredentialRecord::Raw(bytes)) => {
                    println!("  Raw:     {} bytes", bytes.len());
                }
            }
            Ok(())
        }
    }
}

fn cmd_rm(svc: &LocalLootService, args: RmArgs, format: OutputFormat) -> anyhow::Result<()> {
    svc.remove(&args.id)?;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "removed": args.id })),
        OutputFormat::Text => {
            println!("{} Removed {}", "✓".green().bold(), args.id.yellow());
            Ok(())
        }
    }
}

fn cmd_ls(svc: &LocalLootService, args: LsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let entries = match args.kind {
        Some(kind) => svc.list_by_kind(kind)?,
        None => svc.list()?,
    };
    match format {
        OutputFormat::Json => {
            let views: Vec<EntryView<'_>> = entries.iter().map(EntryView::from).collect();
            print_json(&views)
        }
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No loot.");
            }
            for e in &entries {
                println!(
                    "{}  {:<10}  {}  {}",
                    e.id().to_string().yellow(),
                    e.kind().to_string().cyan(),
                    e.created_at().format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                    e.name()
                );
            }
            Ok(())
        }
    }
}

fn cmd_fsck(svc: &LocalLootService, args: FsckArgs, format: OutputFormat) -> anyhow::Result<()> {
    let report = svc.audit()?;
    let pruned = if args.prune && !report.is_clean() {
        svc.prune_stray()?
    } else {
        0
    };
    match format {
        OutputFormat::Json => print_json(&FsckView { report: &report, pruned }),
        OutputFormat::Text => {
            print_report(&report);
            if pruned > 0 {
                println!("{} Pruned {} stray blob(s).", "✓".green(), pruned);
            }
            Ok(())
        }
    }
}

fn print_report(report: &AuditReport) {
    if report.is_clean() {
        println!("{} No issues ({} blobs checked).", "✓".green().bold(), report.scanned);
        return;
    }
    println!("{} {} stray blob(s) of {}:", "!".yellow().bold(), report.stray.len(), report.scanned);
    for stray in &report.stray {
        let why = match &stray.reason {
            StrayReason::NoMetadata => "no entry".to_string(),
            StrayReason::WrongNamespace { kind } => format!("entry is a {kind}"),
        };
        println!("  {}/{}  {}", stray.namespace, stray.id.to_string().yellow(), why.dimmed());
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// JSON shape of an entry. Raw and file bytes are summarized, not dumped.
#[derive(Serialize)]
struct EntryView<'a> {
    id: String,
    name: &'a str,
    kind: LootKind,
    created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<PayloadView<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum PayloadView<'a> {
    File { file_name: &'a str, size: u64 },
    UserPassword { user: &'a str, password: &'a str },
    ApiKey { key: &'a str },
    Raw { size: usize },
}

impl<'a> From<&'a LootEntry> for EntryView<'a> {
    fn from(entry: &'a LootEntry) -> Self {
        let payload = match entry.payload() {
            Payload::None => None,
            Payload::File(f) => Some(PayloadView::File {
                file_name: &f.name,
                size: f.size(),
            }),
            Payload::Credential(CredentialRecord::UserPassword { user, password }) => {
                Some(PayloadView::UserPassword { user, password })
            }
            Payload::Credential(CredentialRecord::ApiKey { key }) => {
                Some(PayloadView::ApiKey { key })
            }
            Payload::Credential(CredentialRecord::Raw(bytes)) => {
                Some(PayloadView::Raw { size: bytes.len() })
            }
        };
        Self {
            id: entry.id().to_string(),
            name: entry.name(),
            kind: entry.kind(),
            created_at: entry.created_at().to_rfc3339(),
            payload,
        }
    }
}

#[derive(Serialize)]
struct FsckView<'a> {
    #[serde(flatten)]
    report: &'a AuditReport,
    pruned: usize,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn run(root: &Path, args: &[&str]) -> anyhow::Result<()> {
        let mut argv = vec!["loot", "--root", root.to_str().unwrap()];
        argv.extend_from_slice(args);
        run_command(Cli::try_parse_from(argv).unwrap())
    }

    fn open(root: &Path) -> LocalLootService {
        LocalLootService::open(&LootConfig::with_root(root)).unwrap()
    }

    #[test]
    fn root_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("loot.toml");
        std::fs::write(&file, "root = \"from-file\"\ndatabase = \"meta.db\"\n").unwrap();

        let c = resolve_config(None, Some(&file)).unwrap();
        assert_eq!(c.root, Path::new("from-file"));

        let c = resolve_config(Some(Path::new("/srv/loot")), Some(&file)).unwrap();
        assert_eq!(c.root, Path::new("/srv/loot"));
        assert_eq!(c.database_path(), Path::new("/srv/loot/meta.db"));
    }

    #[test]
    fn add_file_then_get_to_output() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        let src = dir.path().join("hashes.txt");
        std::fs::write(&src, b"aad3b435b51404ee").unwrap();

        run(&root, &["add", "hashes", "--file", src.to_str().unwrap()]).unwrap();
        let entries = open(&root).list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind(), LootKind::File);

        let out = dir.path().join("out.txt");
        let id = entries[0].id().to_string();
        run(&root, &["get", &id, "--output", out.to_str().unwrap()]).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"aad3b435b51404ee");
    }

    #[test]
    fn add_credential_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        run(&root, &["--format", "json", "add", "dc01", "--user", "admin", "--password", "pw"]).unwrap();

        let svc = open(&root);
        let entry = &svc.list_by_kind(LootKind::Credential).unwrap()[0];
        let id = entry.id().to_string();
        assert!(matches!(
            svc.get(&id).unwrap().payload(),
            Payload::Credential(CredentialRecord::UserPassword { user, .. }) if user == "admin"
        ));

        run(&root, &["rm", &id]).unwrap();
        assert!(open(&root).list().unwrap().is_empty());
        assert!(run(&root, &["rm", &id]).is_err());
    }

    #[test]
    fn add_without_payload_needs_kind() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        assert!(run(&root, &["add", "nothing"]).is_err());
        run(&root, &["add", "file1", "--kind", "file"]).unwrap();
        assert_eq!(open(&root).list_by_kind(LootKind::File).unwrap().len(), 1);
    }

    #[test]
    fn explicit_kind_must_match_payload() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        let err = run(&root, &["add", "k", "--kind", "file", "--api-key", "secret"]).unwrap_err();
        assert!(err.to_string().contains("invalid payload"));
        assert!(open(&root).list().unwrap().is_empty());
    }

    #[test]
    fn get_output_requires_file_payload() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        let entry = open(&root)
            .add("key", LootKind::Credential, CredentialRecord::ApiKey { key: "k".into() }.into())
            .unwrap();
        let out = dir.path().join("out");
        let id = entry.id().to_string();
        assert!(run(&root, &["get", &id, "-o", out.to_str().unwrap()]).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn fsck_prunes_stray_blobs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        let svc = open(&root);
        svc.add("note", LootKind::File, FileBlob::new("n", b"x".to_vec()).into())
            .unwrap();
        std::fs::write(
            root.join("files").join(loot_service::LootId::new().to_string()),
            b"orphan",
        )
        .unwrap();
        assert_eq!(svc.audit().unwrap().stray.len(), 1);

        run(&root, &["fsck", "--prune"]).unwrap();
        assert!(svc.audit().unwrap().is_clean());
        assert_eq!(svc.list().unwrap().len(), 1);
    }

    #[test]
    fn entry_view_summarizes_bytes() {
        let entry = LootEntry::new(
            loot_service::LootId::new(),
            "dump",
            LootKind::Credential,
            chrono::Utc::now(),
            CredentialRecord::Raw(vec![0; 32]).into(),
        )
        .unwrap();
        let json = serde_json::to_value(EntryView::from(&entry)).unwrap();
        assert_eq!(json["kind"], "credential");
        assert_eq!(json["payload"]["type"], "raw");
        assert_eq!(json["payload"]["size"], 32);
    }
}
