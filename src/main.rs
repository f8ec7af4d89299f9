mod ec2_image_client;
mod error;
mod event;
mod handler;
mod image_filter;
mod response;

use lambda_runtime::{handler_fn, Context, Error};
use once_cell::sync::Lazy;
use rusoto_core::Region;
use tracing_subscriber::EnvFilter;

use crate::ec2_image_client::Ec2ImageClient;
use crate::event::LifecycleEvent;
use crate::handler::FindAmiHandler;
use crate::response::{HttpResponder, ResponsePayload};

type EventHandler = FindAmiHandler<fn(Region) -> Ec2ImageClient, HttpResponder>;

// Shared across warm invocations so the callback client's connection pool is
// reused. EC2 clients are opened per request for the requested region.
static HANDLER: Lazy<EventHandler> = Lazy::new(|| {
    FindAmiHandler::new(
        Ec2ImageClient::new as fn(Region) -> Ec2ImageClient,
        HttpResponder::new(),
    )
});

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("find_ami=info")),
        )
        .with_ansi(false)
        .without_time()
        .init();

    lambda_runtime::run(handler_fn(find_ami_handler)).await?;
    Ok(())
}

async fn find_ami_handler(event: LifecycleEvent, _: Context) -> Result<ResponsePayload, Error> {
    Ok(HANDLER.handle(&event).await)
}
