use anyhow::{Result, anyhow};

use super::{Context, show};
use crate::cli::FilesCommand;
use crate::models::{FileCollection, Id};
use crate::ui;
use crate::views::ListView;
use crate::views::files::{self, FileFilter, FilesSource, UploadForm};

pub async fn execute(ctx: &Context, collection: FileCollection, cmd: FilesCommand) -> Result<()> {
    match cmd {
        FilesCommand::List(args) => {
            let filter = FileFilter {
                category: args.category,
                year: args.year,
                search: args.search,
            };
            let mut view = ListView::with_filter(FilesSource::new(collection), filter);
            show(ctx, &mut view).await
        },
        FilesCommand::Upload {
            file,
            title,
            description,
            category,
            year,
        } => {
            let form = UploadForm {
                file,
                title,
                description,
                category,
                year,
            };
            let mut view = ListView::new(FilesSource::new(collection));
            ui::with_spinner(
                "Uploading...",
                view.mutate(&ctx.client, files::upload(&ctx.client, collection, &form)),
            )
            .await?;
            println!("{}", view.render());
            Ok(())
        },
        FilesCommand::Download { id, dir } => {
            let id = Id::new(id);
            let mut view = ListView::new(FilesSource::new(collection));
            view.load(&ctx.client).await?;
            let record = view
                .items()
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| anyhow!("No {} entry with id {id}", collection.label()))?;

            let dir = dir.unwrap_or_else(|| ctx.config.downloads.dir.clone());
            let path = ui::with_spinner(
                "Downloading...",
                files::download(&ctx.client, collection, record, &dir),
            )
            .await?;
            println!("Saved {}", path.display());
            Ok(())
        },
        FilesCommand::Delete { id } => {
            let mut view = ListView::new(FilesSource::new(collection));
            view.mutate(&ctx.client, files::delete(&ctx.client, collection, &Id::new(id)))
                .await?;
            println!("{}", view.render());
            Ok(())
        },
    }
}
