//! Screen state machine.
//!
//! The [`Machine`] owns every piece of session state. The composition root
//! feeds it [`Event`]s through [`Machine::dispatch`] and performs the returned
//! [`Effect`]s; rendering reads [`Machine::state`].

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    Amount, Direction, PayeeRecord, ReferenceGenerator, ScanFailure, SenderIdentity,
    TransactionLog, TransactionRecord, fixtures, parse_payment_uri,
    settlement::DEFAULT_SETTLEMENT_DELAY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Scan,
    ShowMyQr,
    EnterAmount,
    Success,
    /// Overlay shown while a transaction is selected.
    TransactionDetail,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Scan => "Scan QR",
            Self::ShowMyQr => "My QR",
            Self::EnterAmount => "Pay",
            Self::Success => "Payment Successful",
            Self::TransactionDetail => "Transaction Details",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ChooseScan,
    ChooseShowMyQr,
    ChooseQuickPay(PayeeRecord),
    SelectTransaction(Uuid),
    StartCamera,
    RequestImageUpload,
    ScanSucceeded(String),
    ScanFailed(ScanFailure),
    SetAmount(String),
    SubmitPayment,
    SettlementComplete { reference: String },
    Back,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartCapture,
    StopCapture,
    PromptImageUpload,
    ScheduleSettlement { reference: String, delay: Duration },
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-facing message surfaced by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Payment being composed on the amount screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDraft {
    pub payee: PayeeRecord,
    /// Raw amount text; committed only on submit.
    pub amount_input: String,
}

impl PaymentDraft {
    pub fn amount(&self) -> Option<Amount> {
        self.amount_input.parse().ok()
    }

    pub fn is_submittable(&self) -> bool {
        self.amount().is_some_and(Amount::is_positive)
    }
}

/// Draft snapshot taken on submit, waiting for the settlement timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSettlement {
    pub reference: String,
    pub payee: PayeeRecord,
    pub amount: Amount,
}

#[derive(Debug)]
pub struct PaymentState {
    /// Underlying screen; never [`Screen::TransactionDetail`].
    pub screen: Screen,
    pub payee: Option<PayeeRecord>,
    pub draft: Option<PaymentDraft>,
    pub pending: Option<PendingSettlement>,
    pub last_transaction_ref: Option<String>,
    pub transactions: TransactionLog,
    pub selected: Option<Uuid>,
    pub camera_active: bool,
    pub sender: SenderIdentity,
    pub balance: Amount,
    pub merchants: Vec<PayeeRecord>,
}

impl PaymentState {
    /// Screen to render, accounting for the transaction detail overlay.
    pub fn visible_screen(&self) -> Screen {
        if self.selected.is_some() {
            Screen::TransactionDetail
        } else {
            self.screen
        }
    }

    pub fn processing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn selected_transaction(&self) -> Option<&TransactionRecord> {
        self.selected.and_then(|id| self.transactions.get(id))
    }

    /// Record produced by the most recent settlement, shown on the success screen.
    pub fn last_transaction(&self) -> Option<&TransactionRecord> {
        let reference = self.last_transaction_ref.as_deref()?;
        self.transactions
            .iter()
            .find(|record| record.transaction_ref.as_deref() == Some(reference))
    }
}

#[derive(Debug)]
pub struct Machine {
    state: PaymentState,
    references: ReferenceGenerator,
    settlement_delay: Duration,
}

impl Machine {
    /// Return a builder for `Machine`, seeded with the demo fixtures.
    pub fn builder() -> MachineBuilder {
        MachineBuilder::default()
    }

    pub fn state(&self) -> &PaymentState {
        &self.state
    }

    pub fn settlement_delay(&self) -> Duration {
        self.settlement_delay
    }

    /// Applies `event` and returns the side effects the caller must perform.
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        if self.state.selected.is_some() {
            return match event {
                Event::Back | Event::Done => {
                    self.state.selected = None;
                    info!(screen = ?self.state.screen, "transaction detail closed");
                    Vec::new()
                }
                Event::SettlementComplete { reference } => self.complete_settlement(reference),
                other => self.ignore(other),
            };
        }

        match (self.state.screen, event) {
            (Screen::Home, Event::ChooseScan) => {
                self.go(Screen::Scan);
                Vec::new()
            }
            (Screen::Home, Event::ChooseShowMyQr) => {
                self.go(Screen::ShowMyQr);
                Vec::new()
            }
            (Screen::Home, Event::ChooseQuickPay(payee)) => {
                info!(payee = %payee.upi_handle, "quick pay selected");
                self.begin_payment(payee);
                Vec::new()
            }
            (Screen::Home | Screen::Success, Event::SelectTransaction(id)) => self.select(id),
            (Screen::Scan, Event::StartCamera) => {
                if self.state.camera_active {
                    return Vec::new();
                }
                self.state.camera_active = true;
                vec![Effect::StartCapture]
            }
            (Screen::Scan, Event::RequestImageUpload) => vec![Effect::PromptImageUpload],
            (Screen::Scan, Event::ScanSucceeded(raw)) => self.scan_succeeded(&raw),
            (Screen::Scan, Event::ScanFailed(failure)) => self.scan_failed(failure),
            (Screen::Scan, Event::Back) => {
                let effects = self.release_camera();
                self.go(Screen::Home);
                effects
            }
            (Screen::EnterAmount, Event::SetAmount(input)) => {
                if self.state.processing() {
                    debug!("amount change ignored while processing");
                    return Vec::new();
                }
                if let Some(draft) = self.state.draft.as_mut() {
                    draft.amount_input = input;
                }
                Vec::new()
            }
            (Screen::EnterAmount, Event::SubmitPayment) => self.submit(),
            (_, Event::SettlementComplete { reference }) => self.complete_settlement(reference),
            (Screen::EnterAmount, Event::Back | Event::Done) if !self.state.processing() => {
                self.state.draft = None;
                self.state.payee = None;
                self.go(Screen::Home);
                Vec::new()
            }
            (Screen::ShowMyQr, Event::Back | Event::Done) => {
                self.go(Screen::Home);
                Vec::new()
            }
            (Screen::Success, Event::Back | Event::Done) => {
                self.state.payee = None;
                self.state.last_transaction_ref = None;
                self.go(Screen::Home);
                Vec::new()
            }
            (_, other) => self.ignore(other),
        }
    }

    fn go(&mut self, screen: Screen) {
        info!(from = ?self.state.screen, to = ?screen, "screen transition");
        self.state.screen = screen;
    }

    fn ignore(&self, event: Event) -> Vec<Effect> {
        debug!(screen = ?self.state.visible_screen(), ?event, "event ignored");
        Vec::new()
    }

    fn begin_payment(&mut self, payee: PayeeRecord) {
        self.state.draft = Some(PaymentDraft {
            payee: payee.clone(),
            amount_input: String::new(),
        });
        self.state.payee = Some(payee);
        self.go(Screen::EnterAmount);
    }

    fn select(&mut self, id: Uuid) -> Vec<Effect> {
        if !self.state.transactions.contains(id) {
            debug!(%id, "selected transaction is not in the log");
            return Vec::new();
        }
        self.state.selected = Some(id);
        info!(%id, "transaction detail opened");
        Vec::new()
    }

    fn release_camera(&mut self) -> Vec<Effect> {
        if self.state.camera_active {
            self.state.camera_active = false;
            vec![Effect::StopCapture]
        } else {
            Vec::new()
        }
    }

    fn scan_succeeded(&mut self, raw: &str) -> Vec<Effect> {
        match parse_payment_uri(raw) {
            Ok(payee) => {
                info!(payee = %payee.upi_handle, "payment QR accepted");
                let effects = self.release_camera();
                self.begin_payment(payee);
                effects
            }
            Err(rejection) => {
                warn!(%rejection, "scanned payload rejected");
                let failure = ScanFailure::from(rejection);
                vec![Effect::Notify(Notice::error(failure.user_message()))]
            }
        }
    }

    fn scan_failed(&mut self, failure: ScanFailure) -> Vec<Effect> {
        warn!(%failure, "scan failed");
        let notice = Effect::Notify(Notice::error(failure.user_message()));
        match failure {
            ScanFailure::CaptureUnavailable(_) => {
                self.state.camera_active = false;
                vec![notice, Effect::PromptImageUpload]
            }
            ScanFailure::DecodeFailure(_) | ScanFailure::MalformedPayload(_) => vec![notice],
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.state.processing() {
            debug!("payment already processing");
            return Vec::new();
        }
        let Some(draft) = self.state.draft.as_ref() else {
            return Vec::new();
        };
        let Some(amount) = draft.amount().filter(|amount| amount.is_positive()) else {
            debug!(input = %draft.amount_input, "payment submitted without a positive amount");
            return Vec::new();
        };

        let reference = self.references.next_reference();
        info!(%reference, %amount, payee = %draft.payee.upi_handle, "payment submitted");
        self.state.pending = Some(PendingSettlement {
            reference: reference.clone(),
            payee: draft.payee.clone(),
            amount,
        });
        self.state.last_transaction_ref = Some(reference.clone());

        vec![Effect::ScheduleSettlement {
            reference,
            delay: self.settlement_delay,
        }]
    }

    fn complete_settlement(&mut self, reference: String) -> Vec<Effect> {
        let Some(pending) = self
            .state
            .pending
            .take_if(|pending| pending.reference == reference)
        else {
            debug!(%reference, "stale settlement completion ignored");
            return Vec::new();
        };

        let record = TransactionRecord {
            id: Uuid::new_v4(),
            counterparty_name: pending.payee.name,
            counterparty_upi: pending.payee.upi_handle,
            amount: pending.amount,
            direction: Direction::Sent,
            timestamp: Utc::now(),
            transaction_ref: Some(pending.reference),
            sender: Some(self.state.sender.clone()),
        };
        info!(id = %record.id, amount = %record.amount, "payment settled");

        if let Some(evicted) = self.state.transactions.push(record) {
            debug!(id = %evicted.id, "oldest transaction evicted");
        }
        self.state.draft = None;
        self.go(Screen::Success);
        Vec::new()
    }
}

#[derive(Debug)]
pub struct MachineBuilder {
    sender: SenderIdentity,
    balance: Amount,
    merchants: Vec<PayeeRecord>,
    history: Vec<TransactionRecord>,
    settlement_delay: Duration,
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self {
            sender: fixtures::default_sender(),
            balance: fixtures::default_balance(),
            merchants: fixtures::merchants(),
            history: fixtures::seed_history(),
            settlement_delay: DEFAULT_SETTLEMENT_DELAY,
        }
    }
}

impl MachineBuilder {
    pub fn sender(mut self, sender: SenderIdentity) -> MachineBuilder {
        self.sender = sender;
        self
    }

    pub fn balance(mut self, balance: Amount) -> MachineBuilder {
        self.balance = balance;
        self
    }

    pub fn merchants(mut self, merchants: Vec<PayeeRecord>) -> MachineBuilder {
        self.merchants = merchants;
        self
    }

    /// Initial history, most recent first.
    pub fn history(mut self, history: Vec<TransactionRecord>) -> MachineBuilder {
        self.history = history;
        self
    }

    pub fn settlement_delay(mut self, delay: Duration) -> MachineBuilder {
        self.settlement_delay = delay;
        self
    }

    /// Construct `Machine` on the home screen.
    pub fn build(self) -> Machine {
        Machine {
            state: PaymentState {
                screen: Screen::Home,
                payee: None,
                draft: None,
                pending: None,
                last_transaction_ref: None,
                transactions: TransactionLog::from_recent_first(self.history),
                selected: None,
                camera_active: false,
                sender: self.sender,
                balance: self.balance,
                merchants: self.merchants,
            },
            references: ReferenceGenerator::new(),
            settlement_delay: self.settlement_delay,
        }
    }
}
