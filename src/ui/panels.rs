use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Label;
use crate::state::AppState;
use crate::ui::{charts, wordcloud};

// ---------------------------------------------------------------------------
// Left side panel – parameters
// ---------------------------------------------------------------------------

/// Render the left parameter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Parameters");
    ui.separator();

    let bounds = state.config.top_n;
    let mut n = state.top_n;
    ui.label("Number of most common words");
    if ui
        .add(egui::Slider::new(&mut n, bounds.min..=bounds.max))
        .changed()
    {
        state.set_top_n(n);
    }

    ui.add_space(8.0);
    ui.separator();
    ui.strong("Legend");
    for (name, color) in state.colors.legend_entries() {
        ui.label(RichText::new(format!("■ {name}")).color(color));
    }

    if let Some(path) = &state.source {
        ui.add_space(8.0);
        ui.separator();
        ui.label(RichText::new(path.display().to_string()).small().weak());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                // errors are logged and surfaced through `status_message`
                let _ = state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(state.view.is_some(), egui::Button::new("Export summary…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(view) = &state.view {
            ui.label(format!(
                "{} records loaded ({} fake, {} real)",
                view.summary.total, view.summary.fake, view.summary.real
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – the dashboard itself
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        view,
        colors,
        config,
        cloud_palette,
        clouds,
        ..
    } = state;
    let Some(view) = view.as_ref() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a news dataset to begin  (File → Open…)");
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(RichText::new("News Classification Dashboard").size(26.0));
            });
            ui.add_space(8.0);

            charts::overview(ui, view);
            ui.separator();
            charts::distribution_pie(ui, view, colors);

            for label in Label::ALL {
                let Some(panel) = view.panel(label) else {
                    continue;
                };
                ui.separator();
                ui.heading(format!("Most Common Words in {label} News"));
                charts::word_bar_chart(ui, panel, colors.bar(label));
                egui::CollapsingHeader::new(format!("Top {} table", view.top_n))
                    .id_salt(format!("table_header_{label}"))
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        charts::top_words_table(ui, panel);
                    });

                ui.add_space(8.0);
                ui.heading("WordCloud");
                ui.label(format!("Most Frequent Words in {label} News"));
                wordcloud::word_cloud(
                    ui,
                    &panel.frequencies,
                    &config.cloud,
                    cloud_palette,
                    clouds.entry(label).or_default(),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open news dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        // errors are logged and surfaced through `status_message`
        let _ = state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard summary")
        .add_filter("JSON", &["json"])
        .set_file_name("news_summary.json")
        .save_file();

    if let Some(path) = file {
        match state.export_view(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export summary: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
