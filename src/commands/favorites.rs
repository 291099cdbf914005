use anyhow::Result;

use super::{Context, show};
use crate::cli::FavoritesCommand;
use crate::models::{Id, NewFavorite};
use crate::views::ListView;
use crate::views::favorites::{self, FavoritesFilter, FavoritesSource};

pub async fn execute(ctx: &Context, cmd: FavoritesCommand) -> Result<()> {
    match cmd {
        FavoritesCommand::List { item_type } => {
            let mut view = ListView::with_filter(FavoritesSource, FavoritesFilter { item_type });
            show(ctx, &mut view).await
        },
        FavoritesCommand::Add {
            item_type,
            item_id,
            title,
            description,
            url,
        } => {
            let favorite = NewFavorite {
                item_type,
                item_id: Id::new(item_id),
                title,
                description,
                url,
                metadata: serde_json::Value::Null,
            };
            let mut view = ListView::new(FavoritesSource);
            view.mutate(&ctx.client, favorites::add(&ctx.client, &favorite))
                .await?;
            println!("{}", view.render());
            Ok(())
        },
        FavoritesCommand::Remove { id } => {
            let mut view = ListView::new(FavoritesSource);
            view.mutate(&ctx.client, favorites::remove(&ctx.client, &Id::new(id)))
                .await?;
            println!("{}", view.render());
            Ok(())
        },
    }
}
