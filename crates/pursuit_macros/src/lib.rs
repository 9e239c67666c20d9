use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, LitInt, Pat};

/// Time a system or planner call when the `perf_stats` feature is enabled.
///
/// The generated guard logs through Bevy's `info!` when the wrapped body runs
/// longer than the threshold (milliseconds, default 1). If the function takes a
/// `tick: Res<SimTick>` parameter the guard also logs every 100th tick.
///
/// Without `perf_stats` the guard is compiled out entirely.
///
/// ```ignore
/// #[profile(2)]
/// pub fn process_replan_requests(/* ... */, tick: Res<SimTick>) { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn profile(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let threshold_ms: u128 = if attr.is_empty() {
        1
    } else {
        let lit = parse_macro_input!(attr as LitInt);
        lit.base10_parse().unwrap_or(1)
    };

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;
    let label = sig.ident.to_string();

    let tick_param = sig.inputs.iter().any(|arg| {
        let FnArg::Typed(pat_type) = arg else {
            return false;
        };
        let Pat::Ident(pat_ident) = &*pat_type.pat else {
            return false;
        };
        let ty = &pat_type.ty;
        pat_ident.ident == "tick" && quote!(#ty).to_string().contains("SimTick")
    });

    let tick_value = if tick_param {
        quote! { Some(tick.0) }
    } else {
        quote! { None }
    };

    let output = quote! {
        #(#attrs)*
        #vis #sig {
            #[cfg(feature = "perf_stats")]
            let _profile_guard = {
                struct ProfileGuard {
                    label: &'static str,
                    start: std::time::Instant,
                    tick: Option<u64>,
                }
                impl Drop for ProfileGuard {
                    fn drop(&mut self) {
                        let elapsed = self.start.elapsed();
                        let periodic = self.tick.map_or(false, |t| t % 100 == 0);
                        if elapsed.as_millis() > #threshold_ms || periodic {
                            bevy::prelude::info!("[PERF] {}: {:?}", self.label, elapsed);
                        }
                    }
                }
                ProfileGuard {
                    label: #label,
                    start: std::time::Instant::now(),
                    tick: #tick_value,
                }
            };

            #block
        }
    };

    output.into()
}
