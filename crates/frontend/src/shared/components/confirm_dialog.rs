//! Диалог подтверждения перед необратимыми действиями
//!
//! ```text
//! Closed --open--> Open --confirm--> Confirming --close--> Closed
//!                   |                    |
//!                   +------close---------+--release--> Open
//! ```
//!
//! После подтверждения диалог сам не закрывается. Вызывающий код получает
//! [`ConfirmTicket`] и по завершении действия вызывает `close()` или
//! `release()` (повторная попытка). Каждое открытие получает новое поколение,
//! поэтому тикет от предыдущего открытия уже ничего не меняет.
//!
//! # Примеры
//!
//! ```rust,ignore
//! let confirm = ConfirmHandle::new();
//!
//! <ConfirmDialog
//!     handle=confirm
//!     title="Удалить запись"
//!     content="Вы уверены?"
//!     on_confirm=Callback::new(move |ticket: ConfirmTicket| {
//!         spawn_local(async move {
//!             let _ = delete_item().await;
//!             ticket.close();
//!         });
//!     })
//! />
//! ```

use leptos::ev;
use leptos::prelude::*;

use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Closed,
    Open,
    Confirming,
}

/// Состояние диалога вместе с номером открытия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfirmGate {
    pub state: ConfirmState,
    pub generation: u64,
}

impl ConfirmGate {
    /// Открывает закрытый диалог и начинает новое поколение.
    /// Открытый или занятый диалог не меняется.
    pub fn open(self) -> Self {
        match self.state {
            ConfirmState::Closed => Self {
                state: ConfirmState::Open,
                generation: self.generation + 1,
            },
            _ => self,
        }
    }

    /// Возвращает следующее состояние и поколение, для которого нужно
    /// выполнить действие. Срабатывает не более одного раза на переход
    /// `Open → Confirming`.
    pub fn confirm(self) -> (Self, Option<u64>) {
        match self.state {
            ConfirmState::Open => (
                Self {
                    state: ConfirmState::Confirming,
                    ..self
                },
                Some(self.generation),
            ),
            _ => (self, None),
        }
    }

    /// Закрытие пользователем (Отмена, Escape, клик по подложке)
    pub fn dismiss(self) -> Self {
        Self {
            state: ConfirmState::Closed,
            ..self
        }
    }

    /// Закрытие по завершении действия. Чужое поколение игнорируется.
    pub fn close(self, generation: u64) -> Self {
        if generation == self.generation {
            self.dismiss()
        } else {
            self
        }
    }

    /// Возврат в `Open` после ошибки. Чужое поколение игнорируется.
    pub fn release(self, generation: u64) -> Self {
        if generation == self.generation && self.state == ConfirmState::Confirming {
            Self {
                state: ConfirmState::Open,
                ..self
            }
        } else {
            self
        }
    }

    pub fn is_open(self) -> bool {
        self.state != ConfirmState::Closed
    }

    pub fn is_busy(self) -> bool {
        self.state == ConfirmState::Confirming
    }
}

/// Общее управление одним диалогом
#[derive(Clone, Copy)]
pub struct ConfirmHandle {
    gate: RwSignal<ConfirmGate>,
}

impl ConfirmHandle {
    pub fn new() -> Self {
        Self {
            gate: RwSignal::new(ConfirmGate::default()),
        }
    }

    pub fn open(&self) {
        self.gate.update(|g| *g = g.open());
    }

    pub fn dismiss(&self) {
        self.gate.update(|g| *g = g.dismiss());
    }

    pub fn is_open(&self) -> bool {
        self.gate.get().is_open()
    }

    pub fn is_busy(&self) -> bool {
        self.gate.get().is_busy()
    }

    fn try_confirm(&self) -> Option<ConfirmTicket> {
        let mut fired = None;
        self.gate.update(|g| {
            let (next, generation) = g.confirm();
            *g = next;
            fired = generation;
        });
        fired.map(|generation| ConfirmTicket {
            handle: *self,
            generation,
        })
    }
}

impl Default for ConfirmHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Право завершить одно конкретное подтверждение
#[derive(Clone, Copy)]
pub struct ConfirmTicket {
    handle: ConfirmHandle,
    generation: u64,
}

impl ConfirmTicket {
    pub fn close(&self) {
        let generation = self.generation;
        self.handle.gate.update(|g| *g = g.close(generation));
    }

    /// Снова открыть диалог для повторной попытки
    pub fn release(&self) {
        let generation = self.generation;
        self.handle.gate.update(|g| *g = g.release(generation));
    }
}

#[component]
pub fn ConfirmDialog(
    handle: ConfirmHandle,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] content: Signal<String>,
    /// Вызывается один раз на подтверждение. Обязан вызвать `close()` или
    /// `release()` у полученного тикета.
    on_confirm: Callback<ConfirmTicket>,
    #[prop(optional, into)] confirm_label: Option<String>,
) -> impl IntoView {
    let confirm_label = confirm_label.unwrap_or_else(|| "Delete".to_string());

    let escape = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" && handle.gate.get_untracked().is_open() {
            handle.dismiss();
        }
    });
    on_cleanup(move || escape.remove());

    let handle_confirm = move |_| {
        if let Some(ticket) = handle.try_confirm() {
            on_confirm.run(ticket);
        }
    };

    view! {
        <Show when=move || handle.is_open()>
            <div class="modal-overlay" on:click=move |_| handle.dismiss()>
                <div
                    class="modal modal--confirm"
                    role="alertdialog"
                    on:click=|ev: ev::MouseEvent| ev.stop_propagation()
                >
                    <div class="modal-header">
                        <h2 class="modal-title">{move || title.get()}</h2>
                        <button class="button button--icon modal__close" on:click=move |_| handle.dismiss()>
                            {icon("x")}
                        </button>
                    </div>
                    <div class="modal-body">
                        <p>{move || content.get()}</p>
                    </div>
                    <div class="modal-footer">
                        <button
                            class="button button--secondary"
                            on:click=move |_| handle.dismiss()
                        >
                            "Cancel"
                        </button>
                        <button
                            class="button button--danger"
                            on:click=handle_confirm
                            disabled=move || handle.is_busy()
                        >
                            {
                                let label = confirm_label.clone();
                                move || if handle.is_busy() { "Working...".to_string() } else { label.clone() }
                            }
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
