use anyhow::Result;

use super::Context;
use crate::cli::{PartnerArgs, PartnersCommand};
use crate::models::{Id, PartnerInput};
use crate::ui;
use crate::views::{LOADING_MESSAGE, ListView};
use crate::views::partners::{self, PartnersFilter, PartnersSource};

impl From<PartnerArgs> for PartnerInput {
    fn from(args: PartnerArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            description: args.description,
            website: args.website,
            logo_url: args.logo_url,
            email: args.email,
            phone: args.phone,
        }
    }
}

pub async fn execute(ctx: &Context, cmd: PartnersCommand) -> Result<()> {
    let mut view = ListView::new(PartnersSource);
    match cmd {
        PartnersCommand::List { search, category } => {
            let load = view.set_filter(&ctx.client, PartnersFilter { search, category });
            ui::with_spinner(LOADING_MESSAGE, load).await?;
        },
        PartnersCommand::Add(args) => {
            let input = PartnerInput::from(args);
            view.mutate(&ctx.client, partners::create(&ctx.client, &input))
                .await?;
        },
        PartnersCommand::Update { id, fields } => {
            let input = PartnerInput::from(fields);
            view.mutate(&ctx.client, partners::update(&ctx.client, &Id::new(id), &input))
                .await?;
        },
        PartnersCommand::Delete { id } => {
            view.mutate(&ctx.client, partners::delete(&ctx.client, &Id::new(id)))
                .await?;
        },
    }
    println!("{}", view.render());
    Ok(())
}
