//! Tree printers.
//!
//! Two independent serializations per node kind:
//! - [`Expr::show`]: a readable rendering approximating source syntax,
//! - [`Expr::show_raw`]: a structural rendering naming the node kind and
//!   its fields, recursively, with two-space indentation.
//!
//! Both are pure functions of the node and a read-only [`GlobalState`]
//! snapshot. They are the only externally observable string outputs of
//! this crate and the contract snapshot tests assert against.
//!
//! A `Rescue` whose `else`/`ensure` slot holds `EmptyTree` omits that
//! clause from the readable rendering entirely.

use crate::tree::{ClassDefKind, Expr, ExprKind, LiteralValue, MethodFlags, VarKind};
use petrel_core::GlobalState;

fn tab_in(buf: &mut String, tabs: usize) {
    for _ in 0..tabs {
        buf.push_str("  ");
    }
}

/// Comma-joined readable elements. The first shadow argument in a list is
/// preceded by `; ` instead, matching block-parameter syntax.
fn show_elems(buf: &mut String, gs: &GlobalState, elems: &[Expr], tabs: usize) {
    let mut first = true;
    let mut did_shadow = false;
    for elem in elems {
        if !first {
            if matches!(elem.kind, ExprKind::ShadowArg { .. }) && !did_shadow {
                buf.push_str("; ");
                did_shadow = true;
            } else {
                buf.push_str(", ");
            }
        }
        first = false;
        buf.push_str(&elem.show_at(gs, tabs + 1));
    }
}

fn show_parens(buf: &mut String, gs: &GlobalState, elems: &[Expr], tabs: usize) {
    buf.push('(');
    show_elems(buf, gs, elems, tabs);
    buf.push(')');
}

/// Comma-joined structural elements, inline.
fn show_raw_inline(buf: &mut String, gs: &GlobalState, elems: &[Expr], tabs: usize) {
    let mut first = true;
    for elem in elems {
        if !first {
            buf.push_str(", ");
        }
        first = false;
        buf.push_str(&elem.show_raw_at(gs, tabs));
    }
}

/// One structural element per line inside `name = [` ... `]`.
fn show_raw_list(
    buf: &mut String,
    gs: &GlobalState,
    label: &str,
    elems: &[Expr],
    tabs: usize,
) {
    tab_in(buf, tabs + 1);
    buf.push_str(label);
    buf.push_str(" = [\n");
    for elem in elems {
        tab_in(buf, tabs + 2);
        buf.push_str(&elem.show_raw_at(gs, tabs + 2));
        buf.push('\n');
    }
    tab_in(buf, tabs + 1);
    buf.push_str("]\n");
}

fn show_raw_field(buf: &mut String, gs: &GlobalState, label: &str, expr: &Expr, tabs: usize) {
    tab_in(buf, tabs + 1);
    buf.push_str(label);
    buf.push_str(" = ");
    buf.push_str(&expr.show_raw_at(gs, tabs + 1));
    buf.push('\n');
}

fn var_kind_name(kind: VarKind) -> &'static str {
    match kind {
        VarKind::Local => "Local",
        VarKind::Instance => "Instance",
        VarKind::Class => "Class",
        VarKind::Global => "Global",
    }
}

impl LiteralValue {
    /// Readable rendering of the literal value.
    pub fn show(&self, gs: &GlobalState) -> String {
        match self {
            LiteralValue::Integer(n) => n.to_string(),
            LiteralValue::Float(bits) => f64::from_bits(*bits).to_string(),
            LiteralValue::Str(s) => format!("\"{}\"", gs.show_name(*s)),
            LiteralValue::Sym(s) => format!(":{}", gs.show_name(*s)),
            LiteralValue::True => "true".to_owned(),
            LiteralValue::False => "false".to_owned(),
            LiteralValue::Nil => "nil".to_owned(),
        }
    }
}

impl Expr {
    /// Readable rendering approximating source syntax.
    pub fn show(&self, gs: &GlobalState) -> String {
        self.show_at(gs, 0)
    }

    /// Structural rendering: node kind and every field, recursively.
    pub fn show_raw(&self, gs: &GlobalState) -> String {
        self.show_raw_at(gs, 0)
    }

    fn short_symbol(gs: &GlobalState, sym: petrel_core::SymbolRef) -> &'static str {
        gs.show_name(gs.symbols.name(sym))
    }

    pub(crate) fn show_at(&self, gs: &GlobalState, tabs: usize) -> String {
        let mut buf = String::new();
        match &self.kind {
            ExprKind::ClassDef {
                kind,
                symbol,
                name,
                ancestors,
                rhs,
                ..
            } => {
                buf.push_str(match kind {
                    ClassDefKind::Class => "class ",
                    ClassDefKind::Module => "module ",
                });
                buf.push_str(&name.show_at(gs, tabs));
                buf.push('<');
                buf.push_str(Self::short_symbol(gs, *symbol));
                buf.push_str("> < ");
                show_parens(&mut buf, gs, ancestors, tabs);
                for stat in rhs {
                    buf.push('\n');
                    tab_in(&mut buf, tabs + 1);
                    buf.push_str(&stat.show_at(gs, tabs + 1));
                    buf.push('\n');
                }
                tab_in(&mut buf, tabs);
                buf.push_str("end");
            }
            ExprKind::MethodDef {
                name,
                symbol,
                args,
                rhs,
                flags,
                ..
            } => {
                if flags.contains(MethodFlags::SELF_METHOD) {
                    buf.push_str("def self.");
                } else {
                    buf.push_str("def ");
                }
                buf.push_str(gs.show_name(*name));
                buf.push('<');
                buf.push_str(Self::short_symbol(gs, *symbol));
                buf.push('>');
                show_parens(&mut buf, gs, args, tabs);
                buf.push('\n');
                tab_in(&mut buf, tabs + 1);
                buf.push_str(&rhs.show_at(gs, tabs + 1));
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push_str("end");
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                buf.push_str("if ");
                buf.push_str(&cond.show_at(gs, tabs + 1));
                buf.push('\n');
                tab_in(&mut buf, tabs + 1);
                buf.push_str(&then_branch.show_at(gs, tabs + 1));
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push_str("else\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str(&else_branch.show_at(gs, tabs + 1));
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push_str("end");
            }
            ExprKind::While { cond, body } => {
                buf.push_str("while ");
                buf.push_str(&cond.show_at(gs, tabs + 1));
                buf.push('\n');
                tab_in(&mut buf, tabs + 1);
                buf.push_str(&body.show_at(gs, tabs + 1));
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push_str("end");
            }
            ExprKind::Break { expr } => {
                buf.push_str("break(");
                buf.push_str(&expr.show_at(gs, tabs + 1));
                buf.push(')');
            }
            ExprKind::Next { expr } => {
                buf.push_str("next(");
                buf.push_str(&expr.show_at(gs, tabs + 1));
                buf.push(')');
            }
            ExprKind::Return { expr } => {
                buf.push_str("return ");
                buf.push_str(&expr.show_at(gs, tabs + 1));
            }
            ExprKind::Retry => buf.push_str("retry"),
            ExprKind::Rescue {
                body,
                rescue_cases,
                else_branch,
                ensure,
            } => {
                buf.push_str(&body.show_at(gs, tabs));
                for rescue_case in rescue_cases {
                    buf.push('\n');
                    tab_in(&mut buf, tabs.saturating_sub(1));
                    buf.push_str(&rescue_case.show_at(gs, tabs));
                }
                if !else_branch.is_empty_tree() {
                    buf.push('\n');
                    tab_in(&mut buf, tabs.saturating_sub(1));
                    buf.push_str("else\n");
                    tab_in(&mut buf, tabs);
                    buf.push_str(&else_branch.show_at(gs, tabs));
                }
                if !ensure.is_empty_tree() {
                    buf.push('\n');
                    tab_in(&mut buf, tabs.saturating_sub(1));
                    buf.push_str("ensure\n");
                    tab_in(&mut buf, tabs);
                    buf.push_str(&ensure.show_at(gs, tabs));
                }
            }
            ExprKind::RescueCase {
                exceptions,
                var,
                body,
            } => {
                buf.push_str("rescue");
                let mut first = true;
                for exception in exceptions {
                    if first {
                        first = false;
                        buf.push(' ');
                    } else {
                        buf.push_str(", ");
                    }
                    buf.push_str(&exception.show_at(gs, tabs));
                }
                buf.push_str(" => ");
                buf.push_str(&var.show_at(gs, tabs));
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push_str(&body.show_at(gs, tabs));
            }
            ExprKind::Assign { lhs, rhs } => {
                buf.push_str(&lhs.show_at(gs, tabs));
                buf.push_str(" = ");
                buf.push_str(&rhs.show_at(gs, tabs));
            }
            ExprKind::Send {
                recv,
                fun,
                args,
                block,
            } => {
                buf.push_str(&recv.show_at(gs, tabs));
                buf.push('.');
                buf.push_str(gs.show_name(*fun));
                show_parens(&mut buf, gs, args, tabs);
                if let Some(block) = block {
                    buf.push_str(&block.show_at(gs, tabs));
                }
            }
            ExprKind::Yield { args } => {
                buf.push_str("yield");
                show_parens(&mut buf, gs, args, tabs);
            }
            ExprKind::ZSuperArgs => buf.push_str("ZSuperArgs"),
            ExprKind::SelfRef { claz } => {
                buf.push_str("self(");
                buf.push_str(Self::short_symbol(gs, *claz));
                buf.push(')');
            }
            ExprKind::Cast { cast, ty, arg } => {
                buf.push_str("T.");
                buf.push_str(gs.show_name(*cast));
                buf.push('(');
                buf.push_str(&arg.show_at(gs, tabs));
                buf.push_str(", ");
                buf.push_str(&ty.show_at(gs, tabs));
                buf.push(')');
            }
            ExprKind::Hash { keys, values } => {
                buf.push('{');
                let mut first = true;
                for (key, value) in keys.iter().zip(values.iter()) {
                    if !first {
                        buf.push_str(", ");
                    }
                    first = false;
                    buf.push_str(&key.show_at(gs, tabs + 1));
                    buf.push_str(" => ");
                    buf.push_str(&value.show_at(gs, tabs + 1));
                }
                buf.push('}');
            }
            ExprKind::Array { elems } => {
                buf.push('[');
                show_elems(&mut buf, gs, elems, tabs);
                buf.push(']');
            }
            ExprKind::Literal(value) => buf.push_str(&value.show(gs)),
            ExprKind::UnresolvedConstantLit { scope, cnst } => {
                buf.push_str(&scope.show_at(gs, tabs));
                buf.push_str("::");
                buf.push_str(gs.show_name(*cnst));
            }
            ExprKind::ConstantLit {
                symbol,
                original,
                type_alias,
            } => {
                if !symbol.is_todo() {
                    buf.push_str(&gs.show_symbol(*symbol));
                } else if let Some(type_alias) = type_alias {
                    buf.push_str(&type_alias.show_at(gs, tabs));
                } else if let Some(original) = original {
                    buf.push_str("Unresolved: ");
                    buf.push_str(&original.show_at(gs, tabs));
                } else {
                    buf.push_str(&gs.show_symbol(*symbol));
                }
            }
            ExprKind::Block { args, body } => {
                buf.push_str(" do |");
                show_elems(&mut buf, gs, args, tabs + 1);
                buf.push_str("|\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str(&body.show_at(gs, tabs + 1));
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push_str("end");
            }
            ExprKind::InsSeq { stats, expr } => {
                buf.push_str("begin\n");
                for stat in stats {
                    tab_in(&mut buf, tabs + 1);
                    buf.push_str(&stat.show_at(gs, tabs + 1));
                    buf.push('\n');
                }
                tab_in(&mut buf, tabs + 1);
                buf.push_str(&expr.show_at(gs, tabs + 1));
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push_str("end");
            }
            ExprKind::Local { var } => buf.push_str(&var.show(&gs.names)),
            ExprKind::Field { symbol } => buf.push_str(&gs.show_symbol(*symbol)),
            ExprKind::UnresolvedIdent { name, .. } => buf.push_str(gs.show_name(*name)),
            ExprKind::RestArg { expr } => {
                buf.push('*');
                buf.push_str(&expr.show_at(gs, tabs));
            }
            ExprKind::KeywordArg { expr } => {
                buf.push_str(&expr.show_at(gs, tabs));
                buf.push(':');
            }
            ExprKind::OptionalArg { expr, default } => {
                buf.push_str(&expr.show_at(gs, tabs));
                buf.push_str(" = ");
                buf.push_str(&default.show_at(gs, tabs));
            }
            ExprKind::ShadowArg { expr } => buf.push_str(&expr.show_at(gs, tabs)),
            ExprKind::BlockArg { expr } => {
                buf.push('&');
                buf.push_str(&expr.show_at(gs, tabs));
            }
            ExprKind::EmptyTree => buf.push_str("<emptyTree>"),
        }
        buf
    }

    pub(crate) fn show_raw_at(&self, gs: &GlobalState, tabs: usize) -> String {
        let mut buf = String::new();
        match &self.kind {
            ExprKind::ClassDef {
                kind,
                symbol,
                name,
                ancestors,
                rhs,
                ..
            } => {
                buf.push_str("ClassDef{\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str("kind = ");
                buf.push_str(match kind {
                    ClassDefKind::Class => "class",
                    ClassDefKind::Module => "module",
                });
                buf.push('\n');
                tab_in(&mut buf, tabs + 1);
                buf.push_str("name = ");
                buf.push_str(&name.show_raw_at(gs, tabs + 1));
                buf.push('<');
                buf.push_str(Self::short_symbol(gs, *symbol));
                buf.push_str(">\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str("ancestors = [");
                show_raw_inline(&mut buf, gs, ancestors, tabs + 2);
                buf.push_str("]\n");
                show_raw_list(&mut buf, gs, "rhs", rhs, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::MethodDef {
                name,
                symbol,
                args,
                rhs,
                flags,
                ..
            } => {
                buf.push_str("MethodDef{\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str("flags =");
                let words = [
                    (MethodFlags::SELF_METHOD, "self"),
                    (MethodFlags::SYNTHESIZED, "synthesized"),
                ];
                for (flag, word) in words {
                    if flags.contains(flag) {
                        buf.push(' ');
                        buf.push_str(word);
                    }
                }
                if flags.is_empty() {
                    buf.push_str(" 0");
                }
                buf.push('\n');
                tab_in(&mut buf, tabs + 1);
                buf.push_str("name = ");
                buf.push_str(gs.show_name(*name));
                buf.push('<');
                buf.push_str(Self::short_symbol(gs, *symbol));
                buf.push_str(">\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str("args = [");
                show_raw_inline(&mut buf, gs, args, tabs + 2);
                buf.push_str("]\n");
                show_raw_field(&mut buf, gs, "rhs", rhs, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                buf.push_str("If{\n");
                show_raw_field(&mut buf, gs, "cond", cond, tabs);
                show_raw_field(&mut buf, gs, "then", then_branch, tabs);
                show_raw_field(&mut buf, gs, "else", else_branch, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::While { cond, body } => {
                buf.push_str("While{\n");
                show_raw_field(&mut buf, gs, "cond", cond, tabs);
                show_raw_field(&mut buf, gs, "body", body, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::Break { expr } => {
                buf.push_str("Break{ expr = ");
                buf.push_str(&expr.show_raw_at(gs, tabs + 1));
                buf.push_str(" }");
            }
            ExprKind::Next { expr } => {
                buf.push_str("Next{ expr = ");
                buf.push_str(&expr.show_raw_at(gs, tabs + 1));
                buf.push_str(" }");
            }
            ExprKind::Return { expr } => {
                buf.push_str("Return{ expr = ");
                buf.push_str(&expr.show_raw_at(gs, tabs + 1));
                buf.push_str(" }");
            }
            ExprKind::Retry => buf.push_str("Retry{}"),
            ExprKind::Rescue {
                body,
                rescue_cases,
                else_branch,
                ensure,
            } => {
                buf.push_str("Rescue{\n");
                show_raw_field(&mut buf, gs, "body", body, tabs);
                show_raw_list(&mut buf, gs, "rescueCases", rescue_cases, tabs);
                show_raw_field(&mut buf, gs, "else", else_branch, tabs);
                show_raw_field(&mut buf, gs, "ensure", ensure, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::RescueCase {
                exceptions,
                var,
                body,
            } => {
                buf.push_str("RescueCase{\n");
                show_raw_list(&mut buf, gs, "exceptions", exceptions, tabs);
                show_raw_field(&mut buf, gs, "var", var, tabs);
                show_raw_field(&mut buf, gs, "body", body, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::Assign { lhs, rhs } => {
                buf.push_str("Assign{\n");
                show_raw_field(&mut buf, gs, "lhs", lhs, tabs);
                show_raw_field(&mut buf, gs, "rhs", rhs, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::Send {
                recv,
                fun,
                args,
                block,
            } => {
                buf.push_str("Send{\n");
                show_raw_field(&mut buf, gs, "recv", recv, tabs);
                tab_in(&mut buf, tabs + 1);
                buf.push_str("fun = ");
                buf.push_str(gs.show_name(*fun));
                buf.push('\n');
                tab_in(&mut buf, tabs + 1);
                buf.push_str("block = ");
                match block {
                    Some(block) => buf.push_str(&block.show_raw_at(gs, tabs + 1)),
                    None => buf.push_str("None"),
                }
                buf.push('\n');
                show_raw_list(&mut buf, gs, "args", args, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::Yield { args } => {
                buf.push_str("Yield{\n");
                show_raw_list(&mut buf, gs, "args", args, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::ZSuperArgs => buf.push_str("ZSuperArgs{ }"),
            ExprKind::SelfRef { claz } => {
                buf.push_str("Self{ claz = ");
                buf.push_str(&gs.show_symbol(*claz));
                buf.push_str(" }");
            }
            ExprKind::Cast { cast, ty, arg } => {
                buf.push_str("Cast{\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str("cast = ");
                buf.push_str(gs.show_name(*cast));
                buf.push('\n');
                show_raw_field(&mut buf, gs, "arg", arg, tabs);
                show_raw_field(&mut buf, gs, "ty", ty, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::Hash { keys, values } => {
                buf.push_str("Hash{\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str("pairs = [\n");
                for (key, value) in keys.iter().zip(values.iter()) {
                    tab_in(&mut buf, tabs + 2);
                    buf.push_str("[\n");
                    tab_in(&mut buf, tabs + 3);
                    buf.push_str("key = ");
                    buf.push_str(&key.show_raw_at(gs, tabs + 3));
                    buf.push('\n');
                    tab_in(&mut buf, tabs + 3);
                    buf.push_str("value = ");
                    buf.push_str(&value.show_raw_at(gs, tabs + 3));
                    buf.push('\n');
                    tab_in(&mut buf, tabs + 2);
                    buf.push_str("]\n");
                }
                tab_in(&mut buf, tabs + 1);
                buf.push_str("]\n");
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::Array { elems } => {
                buf.push_str("Array{\n");
                show_raw_list(&mut buf, gs, "elems", elems, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::Literal(value) => {
                buf.push_str("Literal{ value = ");
                buf.push_str(&value.show(gs));
                buf.push_str(" }");
            }
            ExprKind::UnresolvedConstantLit { scope, cnst } => {
                buf.push_str("UnresolvedConstantLit{\n");
                show_raw_field(&mut buf, gs, "scope", scope, tabs);
                tab_in(&mut buf, tabs + 1);
                buf.push_str("cnst = ");
                buf.push_str(gs.show_name(*cnst));
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::ConstantLit {
                symbol,
                original,
                type_alias,
            } => {
                buf.push_str("ConstantLit{\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str("orig = ");
                match original {
                    Some(original) => buf.push_str(&original.show_raw_at(gs, tabs + 1)),
                    None => buf.push_str("None"),
                }
                buf.push('\n');
                tab_in(&mut buf, tabs + 1);
                buf.push_str("symbol = ");
                buf.push_str(&gs.show_symbol(*symbol));
                buf.push('\n');
                tab_in(&mut buf, tabs + 1);
                buf.push_str("typeAlias = ");
                match type_alias {
                    Some(type_alias) => buf.push_str(&type_alias.show_raw_at(gs, tabs + 1)),
                    None => buf.push_str("None"),
                }
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::Block { args, body } => {
                buf.push_str("Block{\n");
                show_raw_list(&mut buf, gs, "args", args, tabs);
                show_raw_field(&mut buf, gs, "body", body, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::InsSeq { stats, expr } => {
                buf.push_str("InsSeq{\n");
                show_raw_list(&mut buf, gs, "stats", stats, tabs);
                show_raw_field(&mut buf, gs, "expr", expr, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::Local { var } => {
                buf.push_str("Local{ var = ");
                buf.push_str(&var.show(&gs.names));
                buf.push_str(" }");
            }
            ExprKind::Field { symbol } => {
                buf.push_str("Field{ symbol = ");
                buf.push_str(Self::short_symbol(gs, *symbol));
                buf.push_str(" }");
            }
            ExprKind::UnresolvedIdent { kind, name } => {
                buf.push_str("UnresolvedIdent{\n");
                tab_in(&mut buf, tabs + 1);
                buf.push_str("kind = ");
                buf.push_str(var_kind_name(*kind));
                buf.push('\n');
                tab_in(&mut buf, tabs + 1);
                buf.push_str("name = ");
                buf.push_str(gs.show_name(*name));
                buf.push('\n');
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::RestArg { expr } => {
                buf.push_str("RestArg{ expr = ");
                buf.push_str(&expr.show_raw_at(gs, tabs));
                buf.push_str(" }");
            }
            ExprKind::KeywordArg { expr } => {
                buf.push_str("KeywordArg{ expr = ");
                buf.push_str(&expr.show_raw_at(gs, tabs));
                buf.push_str(" }");
            }
            ExprKind::OptionalArg { expr, default } => {
                buf.push_str("OptionalArg{\n");
                show_raw_field(&mut buf, gs, "expr", expr, tabs);
                show_raw_field(&mut buf, gs, "default", default, tabs);
                tab_in(&mut buf, tabs);
                buf.push('}');
            }
            ExprKind::ShadowArg { expr } => {
                buf.push_str("ShadowArg{ expr = ");
                buf.push_str(&expr.show_raw_at(gs, tabs));
                buf.push_str(" }");
            }
            ExprKind::BlockArg { expr } => {
                buf.push_str("BlockArg{ expr = ");
                buf.push_str(&expr.show_raw_at(gs, tabs));
                buf.push_str(" }");
            }
            ExprKind::EmptyTree => buf.push_str("EmptyTree"),
        }
        buf
    }
}
