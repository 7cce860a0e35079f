//! Receipt dispatcher.
//!
//! The engine walks a receipt's actions in order, selects function calls to a
//! recognized contract method, and runs that method's builder over the log
//! line(s) its `MethodSpec` binds it to. Records come out in persistence
//! order and can be handed to any [`RecordSink`].

use super::context::ReceiptContext;
use super::error::TransformationError;
use super::event::apply_log;
use super::event::create_series::SeriesBuilder;
use super::method::{LogBinding, NftMethod, SavePolicy};
use super::records::{
    EventRecord, NftBuy, NftDecreaseSeriesCopies, NftMint, NftMintBatch, NftOnApprove,
    NftSetSeriesPrice, NftTransfer, NftTransferPayout,
};
use super::traits::EventBuilder;
use crate::db::RecordSink;
use crate::decoding::EventLog;
use crate::types::config::IndexerConfig;
use crate::types::near::{ActionValue, ReceiptWithOutcome};

/// Decodes NFT contract receipts into event records.
#[derive(Debug, Clone, Default)]
pub struct NftEventIndexer {
    config: IndexerConfig,
}

impl NftEventIndexer {
    pub fn new(config: IndexerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Parse a receipt delivered as JSON by the host runtime.
    pub fn parse_receipt(json: &str) -> Result<ReceiptWithOutcome, TransformationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode every recognized function call of one receipt.
    pub fn process_receipt(&self, rwo: &ReceiptWithOutcome) -> Vec<EventRecord> {
        if !self.config.accepts_receiver(&rwo.receipt.receiver_id) {
            tracing::trace!(
                receiver_id = %rwo.receipt.receiver_id,
                "Receipt receiver is not an indexed contract"
            );
            return Vec::new();
        }

        let ctx = ReceiptContext::new(rwo);
        let mut records = Vec::new();

        for action in &rwo.receipt.actions {
            records.extend(self.process_action(&ctx, action));
        }

        records
    }

    /// Decode one action. Non function calls and unknown methods yield nothing.
    pub fn process_action(
        &self,
        ctx: &ReceiptContext<'_>,
        action: &ActionValue,
    ) -> Vec<EventRecord> {
        let Some(call) = action.as_function_call() else {
            tracing::trace!(receipt_id = %ctx.receipt_id, "Skipping action: not a function call");
            return Vec::new();
        };

        let Some(method) = NftMethod::from_method_name(&call.method_name) else {
            tracing::info!(
                receipt_id = %ctx.receipt_id,
                method = %call.method_name,
                "Not processed: unrecognized function call"
            );
            return Vec::new();
        };

        let records = match method {
            NftMethod::Mint => build::<NftMint>(ctx),
            NftMethod::Buy => build::<NftBuy>(ctx),
            NftMethod::CreateSeries => build::<SeriesBuilder>(ctx),
            NftMethod::SetSeriesPrice => build::<NftSetSeriesPrice>(ctx),
            NftMethod::OnApprove => build::<NftOnApprove>(ctx),
            NftMethod::TransferPayout => build::<NftTransferPayout>(ctx),
            NftMethod::DecreaseSeriesCopies => build::<NftDecreaseSeriesCopies>(ctx),
            NftMethod::MintBatch => build::<NftMintBatch>(ctx),
            NftMethod::Transfer => build::<NftTransfer>(ctx),
        };

        tracing::debug!(
            receipt_id = %ctx.receipt_id,
            method = %method,
            records = records.len(),
            "Decoded function call"
        );

        records
    }

    /// Decode a receipt and save each resulting record through `sink`.
    ///
    /// Returns the number of records saved.
    pub async fn index_receipt<S: RecordSink + ?Sized>(
        &self,
        rwo: &ReceiptWithOutcome,
        sink: &S,
    ) -> Result<usize, TransformationError> {
        let records = self.process_receipt(rwo);
        sink.save_all(&records).await?;
        Ok(records.len())
    }
}

/// Run builder `B` over the log line(s) its method is bound to.
fn build<B: EventBuilder>(ctx: &ReceiptContext<'_>) -> Vec<EventRecord> {
    let spec = B::METHOD.spec();

    match spec.binding {
        LogBinding::Line(index) => {
            let line = ctx.log(index);
            build_line::<B>(ctx, ctx.receipt_id.clone(), index, line)
        }
        LogBinding::EveryLine => ctx
            .logs()
            .iter()
            .enumerate()
            .flat_map(|(index, line)| {
                build_line::<B>(ctx, ctx.line_record_id(index), index, Some(line.as_str()))
            })
            .collect(),
    }
}

fn build_line<B: EventBuilder>(
    ctx: &ReceiptContext<'_>,
    id: String,
    index: usize,
    line: Option<&str>,
) -> Vec<EventRecord> {
    let method = B::METHOD;
    let log = line.and_then(|line| decode_line::<B>(ctx, index, line));

    if log.is_none() && method.spec().save == SavePolicy::OnParsedLog {
        tracing::debug!(
            receipt_id = %ctx.receipt_id,
            method = %method,
            line = index,
            present = line.is_some(),
            "No decodable log line, record not saved"
        );
        return Vec::new();
    }

    let mut builder = B::new(id, ctx.envelope.clone(), line);
    if let Some(log) = &log {
        apply_log(&mut builder, log);
    }
    builder.into_records()
}

fn decode_line<B: EventBuilder>(
    ctx: &ReceiptContext<'_>,
    index: usize,
    line: &str,
) -> Option<EventLog> {
    let method = B::METHOD;
    let log = EventLog::parse(line)?;
    let schema = log.schema();
    if !method.spec().schemas.accepts(schema) {
        tracing::debug!(
            receipt_id = %ctx.receipt_id,
            method = %method,
            line = index,
            schema = ?schema,
            "Log schema not used by this method"
        );
        return None;
    }
    Some(log)
}
