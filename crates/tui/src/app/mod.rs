use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event as TerminalEvent, KeyEvent};
use engine::{
    Effect, Event, Machine, Notice, NoticeLevel, PaymentState, Screen, SettlementTask, fixtures,
    spawn_settlement,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    capture::{self, CaptureDevice, CaptureSession, FeedCapture},
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

const TOAST_TTL: Duration = Duration::from_secs(4);
const MAX_AMOUNT_INPUT: usize = 12;

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: NoticeLevel,
    pub expires_at: Instant,
}

/// Presentation-only state; everything else lives in the [`Machine`].
#[derive(Debug, Default)]
pub struct UiState {
    pub toast: Option<ToastState>,
    pub home_cursor: usize,
    /// Path being typed for an image upload, when the prompt is open.
    pub image_prompt: Option<String>,
    pub preset_cursor: Option<usize>,
    pub camera_running: bool,
}

pub struct App {
    machine: Machine,
    capture: Box<dyn CaptureDevice>,
    session: Option<CaptureSession>,
    settlement: Option<SettlementTask>,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,
    pub ui: UiState,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let machine = Machine::builder()
            .sender(config.sender())
            .balance(config.balance()?)
            .settlement_delay(config.settlement_delay())
            .build();
        let capture = FeedCapture::new(config.camera_feed.clone(), config.frame_interval());
        Ok(Self::from_parts(machine, Box::new(capture)))
    }

    pub fn from_parts(machine: Machine, capture: Box<dyn CaptureDevice>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            machine,
            capture,
            session: None,
            settlement: None,
            events_tx,
            events_rx,
            ui: UiState::default(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> &PaymentState {
        self.machine.state()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut session = ui::TerminalSession::enter()?;
        let result = self.event_loop(session.terminal()).await;
        self.shutdown();
        session.leave()?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::AppTerminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            self.expire_toast(Instant::now());
            terminal
                .draw(|frame| ui::render(frame, self.machine.state(), &self.ui))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let TerminalEvent::Key(key) = event::read()? {
                    self.handle_key(key).await;
                }
            }

            self.drain_events();
        }

        Ok(())
    }

    /// Releases the camera and stops any pending settlement timer.
    fn shutdown(&mut self) {
        self.session = None;
        if let Some(task) = self.settlement.take() {
            task.cancel();
        }
        tracing::info!("session closed");
    }

    /// Dispatches every event queued by capture and settlement tasks.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: Event) {
        for effect in self.machine.dispatch(event) {
            self.perform(effect);
        }
        self.sync_ui();
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::StartCapture => match self.capture.start(self.events_tx.clone()) {
                Ok(session) => self.session = Some(session),
                Err(failure) => {
                    tracing::warn!(%failure, "capture could not be started");
                    self.queue(Event::ScanFailed(failure));
                }
            },
            Effect::StopCapture => {
                self.session = None;
            }
            Effect::PromptImageUpload => {
                self.ui.image_prompt = Some(String::new());
            }
            Effect::ScheduleSettlement { reference, delay } => {
                self.settlement = Some(spawn_settlement(reference, delay, self.events_tx.clone()));
            }
            Effect::Notify(notice) => self.show(notice),
        }
    }

    fn queue(&self, event: Event) {
        if self.events_tx.send(event).is_err() {
            tracing::error!("event queue closed");
        }
    }

    fn show(&mut self, notice: Notice) {
        self.ui.toast = Some(ToastState {
            message: notice.message,
            level: notice.level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self
            .ui
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.ui.toast = None;
        }
    }

    fn sync_ui(&mut self) {
        // A failed capture stops the camera without a StopCapture effect.
        if !self.machine.state().camera_active {
            self.session = None;
        }
        let state = self.machine.state();
        let visible = state.visible_screen();
        if visible != Screen::Scan {
            self.ui.image_prompt = None;
        }
        if state.screen != Screen::EnterAmount {
            self.ui.preset_cursor = None;
        }
        self.ui.home_cursor = self
            .ui
            .home_cursor
            .min(state.transactions.len().saturating_sub(1));
        self.ui.camera_running = self
            .session
            .as_ref()
            .is_some_and(CaptureSession::is_running);
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key, self.ui.image_prompt.is_some());
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.ui.image_prompt.is_some() {
            self.handle_prompt_key(action).await;
            return;
        }

        if let Some(event) = self.translate(action) {
            self.dispatch(event);
        }
    }

    async fn handle_prompt_key(&mut self, action: AppAction) {
        let Some(prompt) = self.ui.image_prompt.as_mut() else {
            return;
        };
        match action {
            AppAction::Input(ch) => prompt.push(ch),
            AppAction::Backspace => {
                prompt.pop();
            }
            AppAction::Cancel => self.ui.image_prompt = None,
            AppAction::Submit => {
                let path = PathBuf::from(prompt.trim());
                self.ui.image_prompt = None;
                if path.as_os_str().is_empty() {
                    return;
                }
                let event = match capture::decode_image_file(&path).await {
                    Ok(payload) => Event::ScanSucceeded(payload),
                    Err(failure) => Event::ScanFailed(failure),
                };
                self.dispatch(event);
            }
            _ => {}
        }
    }

    /// Turns a key action into a machine event for the visible screen.
    fn translate(&mut self, action: AppAction) -> Option<Event> {
        let state = self.machine.state();
        match state.visible_screen() {
            Screen::Home => match action {
                AppAction::Input('s' | 'S') => Some(Event::ChooseScan),
                AppAction::Input('m' | 'M') => Some(Event::ChooseShowMyQr),
                AppAction::Input(digit @ '1'..='9') => {
                    let index = digit.to_digit(10)? as usize - 1;
                    state.merchants.get(index).cloned().map(Event::ChooseQuickPay)
                }
                AppAction::Up => {
                    self.ui.home_cursor = self.ui.home_cursor.saturating_sub(1);
                    None
                }
                AppAction::Down => {
                    let last = state.transactions.len().saturating_sub(1);
                    self.ui.home_cursor = (self.ui.home_cursor + 1).min(last);
                    None
                }
                AppAction::Submit => state
                    .transactions
                    .iter()
                    .nth(self.ui.home_cursor)
                    .map(|record| Event::SelectTransaction(record.id)),
                _ => None,
            },
            Screen::Scan => match action {
                AppAction::Input('c' | 'C') => Some(Event::StartCamera),
                AppAction::Input('u' | 'U') => Some(Event::RequestImageUpload),
                AppAction::Input('b' | 'B') | AppAction::Cancel => Some(Event::Back),
                _ => None,
            },
            Screen::EnterAmount => {
                let input = state.draft.as_ref()?.amount_input.clone();
                match action {
                    AppAction::Input(ch)
                        if (ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+'))
                            && input.len() < MAX_AMOUNT_INPUT =>
                    {
                        let mut next = input;
                        next.push(ch);
                        Some(Event::SetAmount(next))
                    }
                    AppAction::Backspace => {
                        let mut next = input;
                        next.pop();
                        Some(Event::SetAmount(next))
                    }
                    AppAction::NextField => {
                        let index = self
                            .ui
                            .preset_cursor
                            .map_or(0, |i| (i + 1) % fixtures::AMOUNT_PRESETS.len());
                        self.ui.preset_cursor = Some(index);
                        Some(Event::SetAmount(fixtures::AMOUNT_PRESETS[index].to_string()))
                    }
                    AppAction::Submit => Some(Event::SubmitPayment),
                    AppAction::Cancel => Some(Event::Back),
                    _ => None,
                }
            }
            Screen::Success => match action {
                AppAction::Submit | AppAction::Cancel => Some(Event::Done),
                AppAction::Input('d' | 'D') => state
                    .last_transaction()
                    .map(|record| Event::SelectTransaction(record.id)),
                _ => None,
            },
            Screen::ShowMyQr | Screen::TransactionDetail => match action {
                AppAction::Input('b' | 'B') | AppAction::Cancel | AppAction::Submit => {
                    Some(Event::Back)
                }
                _ => None,
            },
        }
    }
}
