use anyhow::Result;

use super::Context;
use crate::cli::CmsCommand;
use crate::ui;
use crate::views::LOADING_MESSAGE;
use crate::views::cms::{self, CmsView, PAGES};

pub async fn execute(ctx: &Context, cmd: CmsCommand) -> Result<()> {
    match cmd {
        CmsCommand::Pages => {
            for page in PAGES {
                println!("{page}");
            }
            Ok(())
        },
        CmsCommand::Show { page } => {
            let mut view = CmsView::new(page);
            ui::with_spinner(LOADING_MESSAGE, view.load(&ctx.client)).await?;
            println!("{}", view.render());
            Ok(())
        },
        CmsCommand::Set {
            page,
            title,
            subtitle,
            description,
            image,
        } => {
            // Start from what is stored so untouched fields are kept.
            let mut view = CmsView::new(page);
            view.load(&ctx.client).await?;
            let mut content = view.content().clone();
            if let Some(title) = title {
                content.title = title;
            }
            if let Some(subtitle) = subtitle {
                content.subtitle = subtitle;
            }
            if let Some(description) = description {
                content.description = description;
            }
            if let Some(image) = image {
                content.header_image = Some(image).filter(|i| !i.trim().is_empty());
            }

            ui::with_spinner("Saving...", view.save(&ctx.client, content)).await?;
            println!("{}", view.render());
            Ok(())
        },
        CmsCommand::UploadImage { file } => {
            let url = ui::with_spinner(
                "Uploading...",
                cms::upload_image(&ctx.client, file.as_deref()),
            )
            .await?;
            println!("{url}");
            Ok(())
        },
    }
}
