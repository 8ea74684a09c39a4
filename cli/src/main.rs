use anyhow::{Context, Result};
use clap::Parser;
use sales_inquiry_core::{SalesInquiryCaller, Sdc, TracingReporter};
use sales_inquiry_reads::{logging, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.json_logs);

    let sdc = args
        .input
        .as_deref()
        .map(Sdc::from_file)
        .transpose()
        .context("loading input document")?;
    let plan = args.plan(sdc.as_ref())?;

    tracing::info!(
        base_url = %args.base_url,
        sales_inquiry = %plan.sales_inquiry,
        item = ?plan.item,
        accepter = ?plan.accepter,
        "fetching sales inquiry"
    );

    let caller = SalesInquiryCaller::new(&args.service_config(), args.transport(), TracingReporter);
    caller.fetch_selected(&plan.sales_inquiry, plan.item.as_deref(), &plan.accepter);

    tracing::info!(sales_inquiry = %plan.sales_inquiry, "done");
    Ok(())
}
