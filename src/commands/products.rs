use anyhow::Result;

use super::{Context, show};
use crate::cli::{ProductsCommand, ReservationsCommand};
use crate::models::Id;
use crate::views::ListView;
use crate::views::reservations::{
    self, ProductsFilter, ProductsSource, ReservationsFilter, ReservationsSource,
};

pub async fn execute(ctx: &Context, cmd: ProductsCommand) -> Result<()> {
    match cmd {
        ProductsCommand::List { all } => {
            let filter = ProductsFilter {
                include_inactive: all,
            };
            show(ctx, &mut ListView::with_filter(ProductsSource, filter)).await
        },
        ProductsCommand::Reserve {
            product_id,
            amount,
            notes,
        } => {
            let product_id = Id::new(product_id);
            reservations::reserve(&ctx.client, &product_id, amount, notes).await?;
            println!("Reservation of {amount:.2} EUR on product {product_id} submitted for review");
            Ok(())
        },
    }
}

/// `cabinet reservations ...`: the admin review queue.
pub async fn review(ctx: &Context, cmd: ReservationsCommand) -> Result<()> {
    let mut view = ListView::new(ReservationsSource);
    match cmd {
        ReservationsCommand::List { status } => {
            view.set_filter(&ctx.client, ReservationsFilter { status })
                .await?;
        },
        ReservationsCommand::Approve { id } => {
            view.mutate(&ctx.client, reservations::approve(&ctx.client, &Id::new(id)))
                .await?;
        },
        ReservationsCommand::Reject { id } => {
            view.mutate(&ctx.client, reservations::reject(&ctx.client, &Id::new(id)))
                .await?;
        },
    }
    println!("{}", view.render());
    Ok(())
}
