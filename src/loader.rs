use scene_core::{LoadError, LoadEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Completion = Rc<RefCell<Option<Box<dyn FnOnce(Result<Vec<u8>, LoadError>)>>>>;

/// Fetch `url` as bytes, reporting progress and calling `done` exactly once.
///
/// Progress events carry a percentage when the server sends a length.
pub fn fetch_model(
    url: &str,
    on_event: impl FnMut(LoadEvent) + 'static,
    done: impl FnOnce(Result<Vec<u8>, LoadError>) + 'static,
) {
    let completion: Completion = Rc::new(RefCell::new(Some(Box::new(done))));
    let finish = {
        let completion = completion.clone();
        move |result: Result<Vec<u8>, LoadError>| {
            let pending = completion.borrow_mut().take();
            if let Some(f) = pending {
                f(result);
            }
        }
    };

    let xhr = match web::XmlHttpRequest::new() {
        Ok(x) => x,
        Err(e) => {
            finish(Err(LoadError::Network(format!("{:?}", e))));
            return;
        }
    };
    if let Err(e) = xhr.open("GET", url) {
        finish(Err(LoadError::Network(format!("{:?}", e))));
        return;
    }
    xhr.set_response_type(web::XmlHttpRequestResponseType::Arraybuffer);

    let events: Rc<RefCell<dyn FnMut(LoadEvent)>> = Rc::new(RefCell::new(on_event));

    let progress_events = events.clone();
    let on_progress = Closure::wrap(Box::new(move |ev: web::ProgressEvent| {
        if ev.length_computable() && ev.total() > 0.0 {
            let percent = (ev.loaded() / ev.total() * 100.0) as f32;
            if let Ok(mut f) = progress_events.try_borrow_mut() {
                f(LoadEvent::Progress(percent));
            }
        }
    }) as Box<dyn FnMut(web::ProgressEvent)>);
    xhr.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
    on_progress.forget();

    let load_xhr = xhr.clone();
    let load_events = events.clone();
    let load_finish = finish.clone();
    let on_load = Closure::wrap(Box::new(move || {
        let status = load_xhr.status().unwrap_or(0);
        let result = if (200..300).contains(&status) {
            match load_xhr.response() {
                Ok(body) => match body.dyn_into::<js_sys::ArrayBuffer>() {
                    Ok(buf) => Ok(js_sys::Uint8Array::new(&buf).to_vec()),
                    Err(_) => Err(LoadError::Empty),
                },
                Err(e) => Err(LoadError::Network(format!("{:?}", e))),
            }
        } else {
            Err(LoadError::Status(status))
        };
        if let Ok(mut f) = load_events.try_borrow_mut() {
            f(if result.is_ok() {
                LoadEvent::Loaded
            } else {
                LoadEvent::Failed
            });
        }
        load_finish(result);
    }) as Box<dyn FnMut()>);
    xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();

    let error_events = events;
    let error_finish = finish.clone();
    let on_error = Closure::wrap(Box::new(move || {
        if let Ok(mut f) = error_events.try_borrow_mut() {
            f(LoadEvent::Failed);
        }
        error_finish(Err(LoadError::Network("request failed".into())));
    }) as Box<dyn FnMut()>);
    xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    if let Err(e) = xhr.send() {
        finish(Err(LoadError::Network(format!("{:?}", e))));
    }
}
