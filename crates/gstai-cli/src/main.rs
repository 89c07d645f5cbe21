//! GSTAI CLI - Command-line interface for the GSTAI API
//!
//! Usage:
//!     gstai [OPTIONS] <COMMAND>
//!
//! Environment Variables:
//!     GSTAI_API_KEY: API key (sk_live_... or sk_test_...)
//!     GSTAI_BASE_URL: Override the API endpoint
//!     GSTAI_TIMEOUT_SECS: Per-call timeout in seconds (default: 30)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gstai::{
    Client, Config, DocumentType, ExportFormat, Gstin, InvoiceFilter, ReportFilter, ReportKind,
    ReturnType, TaxPeriod,
};
use std::path::PathBuf;
use std::time::Duration;

/// GSTAI - GST compliance and document analysis from the command line
#[derive(Parser, Debug)]
#[command(name = "gstai")]
#[command(about = "GSTAI - GST compliance and document analysis from the command line")]
#[command(after_help = r#"Examples:
    # Analyze an invoice PDF
    gstai analyze invoice.pdf --doc-type invoice

    # Fetch a reconciliation report
    gstai recon-report recon_123

    # Upload a document with metadata
    gstai upload invoice.pdf --doc-type invoice

    # Sales report for a quarter
    gstai sales-report --gstin 27ABCDE1234F1Z5 --from 2024-01-01 --to 2024-03-31

    # File a GSTR-1 return from a JSON payload
    gstai file-return gstr1 --gstin 27ABCDE1234F1Z5 --period 012024 --data return.json

    # Validate a GSTIN against the registry
    gstai validate-gstin 27ABCDE1234F1Z5
"#)]
struct Cli {
    /// API key for authentication
    #[arg(long, env = "GSTAI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// API base URL
    #[arg(long, env = "GSTAI_BASE_URL")]
    base_url: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, env = "GSTAI_TIMEOUT_SECS", default_value = "30")]
    timeout: u64,

    /// Suppress log output
    #[arg(short = 'q', long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a document with the AI extraction model
    Analyze {
        /// Path to the document
        file: PathBuf,

        /// Document type tag (invoice, receipt, purchase_order, ...)
        #[arg(long, default_value = "invoice")]
        doc_type: String,
    },

    /// Fetch a reconciliation report by ID
    ReconReport {
        /// Report ID (recon_...)
        report_id: String,
    },

    /// Upload a document for processing
    Upload {
        /// Path to the document
        file: PathBuf,

        /// Document type tag
        #[arg(long, default_value = "invoice")]
        doc_type: String,
    },

    /// Generate a sales report
    SalesReport {
        /// Filter by GSTIN
        #[arg(long)]
        gstin: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Export instead of fetching inline (csv, xlsx, pdf, json)
        #[arg(long)]
        export: Option<String>,
    },

    /// File a GST return from a JSON payload file
    FileReturn {
        /// Return form (gstr1, gstr3b, gstr9)
        return_type: String,

        /// GSTIN to file for
        #[arg(long)]
        gstin: String,

        /// Tax period (MMYYYY)
        #[arg(long)]
        period: String,

        /// Path to the JSON payload
        #[arg(long)]
        data: PathBuf,
    },

    /// List invoices
    Invoices {
        /// Filter by GSTIN
        #[arg(long)]
        gstin: Option<String>,

        /// Filter by tax period (MMYYYY)
        #[arg(long)]
        period: Option<String>,
    },

    /// Validate a GSTIN against the registry
    ValidateGstin {
        /// The GSTIN to check
        gstin: String,
    },
}

fn parse_date(raw: &str) -> Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("'{}' is not a YYYY-MM-DD date", raw))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::new(cli.api_key).with_timeout(Duration::from_secs(cli.timeout));
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    let client = Client::with_config(config)?;

    match cli.command {
        Command::Analyze { file, doc_type } => {
            let result = client
                .ai()
                .analyze_document(&file, DocumentType::from(doc_type.as_str()))
                .await?;
            print_json(result.as_value())
        }

        Command::ReconReport { report_id } => {
            let report = client.reconciliation().get_report(&report_id).await?;
            print_json(report.as_value())
        }

        Command::Upload { file, doc_type } => {
            let receipt = client
                .uploads()
                .document(&file, DocumentType::from(doc_type.as_str()), &serde_json::Value::Null)
                .await?;
            println!("upload accepted: {}", receipt.upload_id);
            if let Some(status) = receipt.status {
                println!("status: {}", status);
            }
            Ok(())
        }

        Command::SalesReport {
            gstin,
            from,
            to,
            export,
        } => {
            let mut filter = ReportFilter::new();
            if let Some(gstin) = gstin {
                filter = filter.with_gstin(Gstin::parse(&gstin)?);
            }
            if let (Some(from), Some(to)) = (from.as_deref(), to.as_deref()) {
                filter = filter.with_date_range(parse_date(from)?, parse_date(to)?);
            }

            match export.as_deref() {
                None => {
                    let report = client.reports().sales(&filter).await?;
                    print_json(report.as_value())
                }
                Some(format) => {
                    let format = match format {
                        "csv" => ExportFormat::Csv,
                        "xlsx" => ExportFormat::Xlsx,
                        "pdf" => ExportFormat::Pdf,
                        "json" => ExportFormat::Json,
                        other => anyhow::bail!("'{}' is not an export format", other),
                    };
                    let job = client
                        .reports()
                        .export(ReportKind::Sales, format, &filter)
                        .await?;
                    println!("export started: {} ({})", job.export_id, job.status);
                    Ok(())
                }
            }
        }

        Command::FileReturn {
            return_type,
            gstin,
            period,
            data,
        } => {
            let return_type: ReturnType = return_type.parse()?;
            let gstin = Gstin::parse(&gstin)?;
            let period = TaxPeriod::parse(&period)?;
            let raw = std::fs::read_to_string(&data)
                .with_context(|| format!("cannot read {}", data.display()))?;
            let payload: serde_json::Value =
                serde_json::from_str(&raw).context("payload is not valid JSON")?;

            let receipt = client
                .gst()
                .file_return(return_type, &gstin, period, &payload)
                .await?;
            println!("return filed: {}", receipt.return_id);
            if let Some(ack) = receipt.acknowledgement_number {
                println!("acknowledgement: {}", ack);
            }
            Ok(())
        }

        Command::Invoices { gstin, period } => {
            let mut filter = InvoiceFilter::new();
            if let Some(gstin) = gstin {
                filter = filter.with_gstin(Gstin::parse(&gstin)?);
            }
            if let Some(period) = period {
                filter = filter.with_period(TaxPeriod::parse(&period)?);
            }
            let list = client.invoices().list(&filter).await?;
            for invoice in &list.invoices {
                println!(
                    "{}  {}  {}",
                    invoice.id,
                    invoice.status.as_deref().unwrap_or("-"),
                    invoice
                        .total
                        .map(|t| format!("{:.2}", t))
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            if let Some(count) = list.total_count {
                println!("total: {}", count);
            }
            Ok(())
        }

        Command::ValidateGstin { gstin } => {
            let gstin = Gstin::parse(&gstin)?;
            println!("format ok, state: {}", gstin.state_name());
            let details = client.gst().validate_gstin(&gstin).await?;
            if details.valid {
                println!(
                    "registry: active ({})",
                    details.legal_name.as_deref().unwrap_or("name withheld")
                );
            } else {
                println!("registry: not registered");
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }

    run(cli).await
}
