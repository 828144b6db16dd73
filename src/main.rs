use clap::Parser;
use push_probe::configuration::{Cli, Config};
use push_probe::dispatcher::{dispatch_all, ensure_delivered};
use push_probe::notifications::{HttpNotificationSender, PreviewSender};
use push_probe::telemetry::{get_subscriber, init_subscriber};
use push_probe::traits::NotificationSender;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::try_from(Cli::parse())?;

    let subscriber = get_subscriber("push-probe".into(), config.log_level.clone(), std::io::stderr);
    init_subscriber(subscriber);

    info!(
        endpoint = %config.endpoint,
        set = ?config.fixture_set,
        policy = ?config.policy,
        dry_run = config.dry_run,
        "Starting push-probe"
    );

    let sender: Box<dyn NotificationSender> = if config.dry_run {
        Box::new(PreviewSender::new())
    } else {
        Box::new(HttpNotificationSender::new(
            config.endpoint.clone(),
            config.token.clone(),
            config.timeout,
        )?)
    };

    let payloads = config.fixture_set.payloads();
    let mut stdout = std::io::stdout().lock();
    let report = dispatch_all(sender.as_ref(), &payloads, config.policy, &mut stdout).await?;

    ensure_delivered(&report)
}
