use slint::{ComponentHandle, Rgb8Pixel, Rgba8Pixel, SharedPixelBuffer};
use std::{cell::RefCell, rc::Rc};
use united_colors_effect::{
    EffectConfig, EffectSession, Image, Previewer, UnitedColorsError, UnitedColorsResult,
    blend::INTENSITY_MAX,
};

slint::slint! {
    import { Button, HorizontalBox, Slider, VerticalBox } from "std-widgets.slint";

    export component EffectWindow inherits Window {
        in property <string> window-title: "United Colors Effect";
        in property <image> preview;
        in property <string> slider-label: "Effect";
        in property <float> slider-max: 100;
        in-out property <float> intensity: 0;

        callback intensity-changed(int);
        callback confirm();

        title: root.window-title;
        min-width: 320px;
        min-height: 240px;
        forward-focus: key-handler;

        key-handler := FocusScope {
            key-pressed(event) => {
                root.confirm();
                accept
            }

            VerticalBox {
                Image {
                    source: root.preview;
                    image-fit: contain;
                    vertical-stretch: 1;
                }

                HorizontalBox {
                    vertical-stretch: 0;

                    Text {
                        text: root.slider-label + ": " + round(root.intensity) + "%";
                        vertical-alignment: center;
                    }

                    Slider {
                        minimum: 0;
                        maximum: root.slider-max;
                        step: 1;
                        value <=> root.intensity;
                        changed(value) => {
                            root.intensity-changed(round(value));
                        }
                    }

                    Button {
                        text: "Save";
                        clicked => {
                            root.confirm();
                        }
                    }
                }
            }
        }
    }
}

/// Desktop window with the preview image, an intensity slider and a Save
/// button. Any key press or closing the window also confirms.
pub struct WindowPreviewer {
    config: EffectConfig,
}

impl WindowPreviewer {
    pub fn new(config: EffectConfig) -> Self {
        Self { config }
    }
}

impl Previewer for WindowPreviewer {
    fn preview(&mut self, session: EffectSession) -> UnitedColorsResult<EffectSession> {
        let ui = EffectWindow::new().map_err(preview_error)?;
        ui.set_window_title(self.config.window_title.as_str().into());
        ui.set_slider_label(self.config.slider_label.as_str().into());
        ui.set_slider_max(INTENSITY_MAX as f32);
        ui.set_intensity(session.intensity().percent() as f32);
        ui.set_preview(to_slint_image(session.output()));

        // Callbacks must be 'static, so the session lives behind Rc until the
        // window closes.
        let session = Rc::new(RefCell::new(Some(session)));

        {
            let ui_weak = ui.as_weak();
            let session = session.clone();
            ui.on_intensity_changed(move |percent| {
                let Some(ui) = ui_weak.upgrade() else {
                    return;
                };

                if let Some(session) = session.borrow_mut().as_mut() {
                    match session.set_intensity(percent) {
                        Ok(output) => ui.set_preview(to_slint_image(output)),
                        Err(e) => log::warn!("recompute failed: {e}"),
                    }
                }
            });
        }

        {
            let ui_weak = ui.as_weak();
            ui.on_confirm(move || {
                if let Some(ui) = ui_weak.upgrade() {
                    _ = ui.hide();
                }
            });
        }

        ui.run().map_err(preview_error)?;
        log::debug!("preview window closed");

        let session = session.borrow_mut().take();
        session.ok_or_else(|| UnitedColorsError::Preview("effect session is gone".to_string()))
    }
}

fn preview_error(e: impl std::fmt::Display) -> UnitedColorsError {
    UnitedColorsError::Preview(e.to_string())
}

/// Converts B, G, R[, A] storage to a displayable slint image.
fn to_slint_image(image: &Image) -> slint::Image {
    let (width, height) = (image.width(), image.height());
    let mut rgb = image.as_raw().to_vec();
    for pixel in rgb.chunks_exact_mut(image.channels()) {
        pixel.swap(0, 2);
    }

    if image.has_alpha() {
        let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(&rgb, width, height);
        slint::Image::from_rgba8(buffer)
    } else {
        let buffer = SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(&rgb, width, height);
        slint::Image::from_rgb8(buffer)
    }
}
