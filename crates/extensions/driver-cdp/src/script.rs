//! Page-side JavaScript used to resolve selectors.
//!
//! Every script is a self-contained expression. Elements are found fresh on
//! each call from a `(selector, index)` pair, so no remote object ids are
//! held between calls. Selectors starting with `xpath=` are evaluated as
//! XPath, all others with `querySelectorAll`.

use serde_json::Value;

const XPATH_PREFIX: &str = "xpath=";

const RESOLVE: &str = r#"
const __all = (sel) => {
  if (sel.startsWith("xpath=")) {
    const snap = document.evaluate(sel.slice(6), document, null,
      XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
    const out = [];
    for (let i = 0; i < snap.snapshotLength; i++) out.push(snap.snapshotItem(i));
    return out;
  }
  return Array.from(document.querySelectorAll(sel));
};
const __text = (el) => (el.innerText ?? el.textContent ?? "");
"#;

/// JavaScript string literal for `value`.
fn literal(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

fn wrap(body: &str) -> String {
    format!("(() => {{{}{}}})()", RESOLVE, body)
}

/// Whether `selector` is XPath rather than CSS.
pub fn is_xpath(selector: &str) -> bool {
    selector.starts_with(XPATH_PREFIX)
}

/// Number of matches.
pub fn count(selector: &str) -> String {
    wrap(&format!("return __all({}).length;", literal(selector)))
}

/// Scroll the element into view and return its centre as `{x, y}`, or
/// `null` when absent. Zero-sized elements report `visible: false`.
pub fn center(selector: &str, index: usize) -> String {
    wrap(&format!(
        r#"
const el = __all({sel})[{index}];
if (!el) return null;
el.scrollIntoView({{block: "center", inline: "center"}});
const r = el.getBoundingClientRect();
return {{x: r.left + r.width / 2, y: r.top + r.height / 2, visible: r.width > 0 && r.height > 0}};
"#,
        sel = literal(selector),
        index = index
    ))
}

/// Focus the first match and clear its value. Returns `false` when absent.
pub fn focus_and_clear(selector: &str) -> String {
    wrap(&format!(
        r#"
const el = __all({sel})[0];
if (!el) return false;
el.focus();
if ("value" in el) {{
  el.value = "";
  el.dispatchEvent(new Event("input", {{bubbles: true}}));
}}
return true;
"#,
        sel = literal(selector)
    ))
}

/// Text of the `index`-th match, trimmed by the caller; `null` when absent.
pub fn text(selector: &str, index: usize) -> String {
    wrap(&format!(
        r#"
const el = __all({sel})[{index}];
return el ? __text(el) : null;
"#,
        sel = literal(selector),
        index = index
    ))
}

/// Choose an option by value. Returns `"ok"`, `"missing"` or `"no-option"`.
pub fn select_option(selector: &str, value: &str) -> String {
    wrap(&format!(
        r#"
const el = __all({sel})[0];
if (!el) return "missing";
const opt = Array.from(el.options || []).find((o) => o.value === {value});
if (!opt) return "no-option";
el.value = opt.value;
el.dispatchEvent(new Event("input", {{bubbles: true}}));
el.dispatchEvent(new Event("change", {{bubbles: true}}));
return "ok";
"#,
        sel = literal(selector),
        value = literal(value)
    ))
}
