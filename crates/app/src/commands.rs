//! Subcommand implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use satchel_application::ports::{EnvironmentStorage, FileSystem};
use satchel_application::use_cases::{
    FetchCollection, LoadCollection, MergeCollections, MergeOptions, PublishCollection,
    ResolveRequest, ResolvedRequest, SaveCollection,
};
use satchel_application::{ApplicationError, ApplicationResult};
use satchel_domain::{
    Collection, CollectionId, EnvironmentSet, Item, ItemGroup, ItemList, PropertyList,
};
use satchel_infrastructure::{
    ConfigError, FileCollectionStorage, FileEnvironmentStorage, PostmanApiClient,
    PostmanApiConfig, TokioFileSystem, decode_collection, render_collection, validate_document,
};
use tracing::{info, warn};

use crate::cli::{
    Cli, Command, FetchArgs, FileArgs, FormatArgs, InspectArgs, MergeArgs, PushArgs, ResolveArgs,
};

type Storage = FileCollectionStorage<TokioFileSystem>;

fn storage() -> Storage {
    FileCollectionStorage::new(TokioFileSystem::new())
}

/// Runs the selected subcommand.
///
/// # Errors
///
/// Returns the first error raised by the command.
pub async fn run(cli: Cli) -> ApplicationResult<()> {
    let Cli {
        command,
        api_key,
        api_url,
        ..
    } = cli;
    match command {
        Command::Inspect(args) => inspect(args).await,
        Command::Validate(args) => validate(args).await,
        Command::Resolve(args) => resolve(args).await,
        Command::Format(args) => reformat(args).await,
        Command::Merge(args) => merge(args).await,
        Command::Fetch(args) => fetch(args, api_config(api_key, &api_url)?).await,
        Command::Push(args) => push(args, api_config(api_key, &api_url)?).await,
    }
}

fn api_config(api_key: Option<String>, api_url: &str) -> Result<PostmanApiConfig, ConfigError> {
    PostmanApiConfig::new(api_key.ok_or(ConfigError::MissingApiKey)?)?.with_base_url(api_url)
}

async fn inspect(args: InspectArgs) -> ApplicationResult<()> {
    let text = TokioFileSystem::new().read_file_string(&args.file).await?;
    let decoded = decode_collection(&text)?;
    print!("{}", Tree(&decoded.collection));

    if args.warnings {
        for warning in &decoded.warnings {
            println!("{warning}");
        }
    } else if !decoded.warnings.is_empty() {
        warn!(
            count = decoded.warnings.len(),
            "some entries could not be read; rerun with --warnings to list them"
        );
    }
    Ok(())
}

async fn validate(args: FileArgs) -> ApplicationResult<()> {
    let text = TokioFileSystem::new().read_file_string(&args.file).await?;
    let report = validate_document(&text);
    println!(
        "schema: {}",
        report.schema_version.as_deref().unwrap_or("unknown")
    );
    println!("folders: {}", report.folder_count);
    println!("requests: {}", report.request_count);
    for issue in &report.issues {
        println!("issue: {issue}");
    }
    if report.is_valid {
        Ok(())
    } else {
        Err(ApplicationError::Codec(format!(
            "{} is not a valid collection",
            args.file.display()
        )))
    }
}

async fn resolve(args: ResolveArgs) -> ApplicationResult<()> {
    let collection = LoadCollection::new(storage()).execute(&args.file).await?;
    let resolver = match load_overrides(&args.envs, args.env_name.as_deref()).await? {
        Some(overrides) => ResolveRequest::with_overrides(overrides),
        None => ResolveRequest::new(),
    };

    match (args.request, args.text) {
        (Some(name), _) => print!("{}", RequestView(&resolver.execute(&collection, &name)?)),
        (None, Some(text)) => println!("{}", resolver.resolve_text(&collection, &text)?),
        (None, None) => {
            return Err(ApplicationError::Configuration(
                "nothing to resolve".to_string(),
            ));
        }
    }
    Ok(())
}

async fn load_overrides(
    files: &[PathBuf],
    name: Option<&str>,
) -> ApplicationResult<Option<PropertyList>> {
    let storage = FileEnvironmentStorage::new(TokioFileSystem::new());
    let mut environments = EnvironmentSet::new();
    let mut last = None;
    for file in files {
        let environment = storage.load(file).await?;
        last = Some(environment.name.clone());
        environments.insert(environment);
    }

    let Some(selected) = name.map(str::to_owned).or(last) else {
        return Ok(None);
    };
    environments
        .merged(&selected)
        .map(Some)
        .ok_or_else(|| ApplicationError::NotFound(format!("environment {selected}")))
}

async fn reformat(args: FormatArgs) -> ApplicationResult<()> {
    let collection = LoadCollection::new(storage()).execute(&args.file).await?;
    emit(&collection, args.output.as_deref()).await
}

async fn merge(args: MergeArgs) -> ApplicationResult<()> {
    let load = LoadCollection::new(storage());
    let mut target = load.execute(&args.target).await?;
    let other = load.execute(&args.other).await?;

    let options = MergeOptions {
        parent_folder: args.parent,
        copy_scripts: args.copy_scripts,
        copy_variables: args.copy_variables,
    };
    MergeCollections::new(options).execute(&mut target, other)?;
    SaveCollection::new(storage())
        .execute(&target, &args.output)
        .await
}

async fn fetch(args: FetchArgs, config: PostmanApiConfig) -> ApplicationResult<()> {
    let api = PostmanApiClient::new(config)?;
    let collection = FetchCollection::new(api)
        .execute(&CollectionId::new(args.id))
        .await?;
    emit(&collection, args.output.as_deref()).await
}

async fn push(args: PushArgs, config: PostmanApiConfig) -> ApplicationResult<()> {
    let mut collection = LoadCollection::new(storage()).execute(&args.file).await?;
    let api = PostmanApiClient::new(config)?;
    let outcome = PublishCollection::new(api)
        .execute(&mut collection, args.workspace.as_deref())
        .await?;

    if outcome.created {
        SaveCollection::new(storage())
            .execute(&collection, &args.file)
            .await?;
        info!(path = %args.file.display(), "recorded new collection id");
    }
    println!("{}", outcome.id);
    Ok(())
}

async fn emit(collection: &Collection, output: Option<&Path>) -> ApplicationResult<()> {
    match output {
        Some(path) => SaveCollection::new(storage()).execute(collection, path).await,
        None => {
            print!("{}", render_collection(collection)?);
            Ok(())
        }
    }
}

/// Indented folder and request listing.
struct Tree<'a>(&'a Collection);

impl Tree<'_> {
    fn write_items(f: &mut fmt::Formatter<'_>, items: &ItemList, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        for item in items.iter() {
            match item {
                Item::Folder(folder) => {
                    writeln!(f, "{indent}{}/", folder.name)?;
                    Self::write_items(f, folder.children(), depth + 1)?;
                }
                Item::Request(request) => {
                    writeln!(f, "{indent}{} {}", request.request.method, request.name)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let collection = self.0;
        writeln!(
            f,
            "{} ({} requests)",
            collection.name(),
            collection.request_count()
        )?;
        Self::write_items(f, collection.children(), 1)
    }
}

/// HTTP-message style rendering of a resolved request.
struct RequestView<'a>(&'a ResolvedRequest);

impl fmt::Display for RequestView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let request = self.0;
        writeln!(f, "{} {}", request.method, request.url)?;
        for (name, value) in &request.headers {
            writeln!(f, "{name}: {value}")?;
        }
        if let Some(auth) = &request.auth {
            let parameters: Vec<String> = auth
                .parameters()
                .iter()
                .filter_map(|p| Some(format!("{}={}", p.key()?, p.value().unwrap_or_default())))
                .collect();
            writeln!(f, "# auth {} {}", auth.auth_type(), parameters.join(" "))?;
        }
        if let Some(body) = &request.body {
            writeln!(f)?;
            writeln!(f, "{body}")?;
        }
        Ok(())
    }
}
