//! Uniform traversal over AST nodes.

use super::{
    Assignment, ColumnConstraint, ColumnConstraintKind, ColumnDefinition, CommonTableExpression,
    CompoundPart, ConflictTarget, CreateIndexStatement, CreateTableStatement,
    CreateTriggerStatement, CreateViewStatement, CreateVirtualTableStatement, DeclaredStatement,
    DeleteStatement, DriftFile, DriftStatement, Expr, ForeignKeyClause, FrameBoundary, FrameSpec,
    FunctionParameters, ImportStatement, InSource, IndexedColumn, InsertSource, InsertStatement,
    JoinClause, JoinConstraint, LimitClause, LimitKind, NamedWindow, OrderByClause, OrderingItem,
    Over, ResultColumn, ReturningClause, RowClassAnnotation, SelectClause, SelectCore,
    SelectStatement, Statement, StatementParameter, TableConstraint, TableConstraintKind, TableRef,
    TypeName, UpdateStatement, UpsertAction, UpsertClause, ValuesClause, WhenClause,
    WindowDefinition, WithClause,
};
use crate::lexer::Span;

/// A borrowed view of any AST node that carries a span.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Expr(&'a Expr),
    Select(&'a SelectStatement),
    Insert(&'a InsertStatement),
    Update(&'a UpdateStatement),
    Delete(&'a DeleteStatement),
    CreateTable(&'a CreateTableStatement),
    CreateVirtualTable(&'a CreateVirtualTableStatement),
    CreateView(&'a CreateViewStatement),
    CreateTrigger(&'a CreateTriggerStatement),
    CreateIndex(&'a CreateIndexStatement),
    With(&'a WithClause),
    CommonTableExpression(&'a CommonTableExpression),
    SelectClause(&'a SelectClause),
    Values(&'a ValuesClause),
    Compound(&'a CompoundPart),
    ResultColumn(&'a ResultColumn),
    TableRef(&'a TableRef),
    Join(&'a JoinClause),
    When(&'a WhenClause),
    OrderBy(&'a OrderByClause),
    OrderingItem(&'a OrderingItem),
    Limit(&'a LimitClause),
    Window(&'a WindowDefinition),
    NamedWindow(&'a NamedWindow),
    Frame(&'a FrameSpec),
    TypeName(&'a TypeName),
    Assignment(&'a Assignment),
    Upsert(&'a UpsertClause),
    ConflictTarget(&'a ConflictTarget),
    Returning(&'a ReturningClause),
    ColumnDefinition(&'a ColumnDefinition),
    ColumnConstraint(&'a ColumnConstraint),
    TableConstraint(&'a TableConstraint),
    ForeignKey(&'a ForeignKeyClause),
    IndexedColumn(&'a IndexedColumn),
    RowClass(&'a RowClassAnnotation),
    DriftFile(&'a DriftFile),
    Import(&'a ImportStatement),
    Declared(&'a DeclaredStatement),
    StatementParameter(&'a StatementParameter),
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        match statement {
            Statement::Select(s) => Self::Select(s),
            Statement::Insert(s) => Self::Insert(s),
            Statement::Update(s) => Self::Update(s),
            Statement::Delete(s) => Self::Delete(s),
            Statement::CreateTable(s) => Self::CreateTable(s),
            Statement::CreateVirtualTable(s) => Self::CreateVirtualTable(s),
            Statement::CreateView(s) => Self::CreateView(s),
            Statement::CreateTrigger(s) => Self::CreateTrigger(s),
            Statement::CreateIndex(s) => Self::CreateIndex(s),
        }
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        Self::Expr(expr)
    }
}

/// Collects child nodes in source order.
struct Children<'a>(Vec<Node<'a>>);

impl<'a> Children<'a> {
    fn push(&mut self, node: Node<'a>) {
        self.0.push(node);
    }

    fn expr(&mut self, expr: &'a Expr) {
        self.0.push(Node::Expr(expr));
    }

    fn opt_expr(&mut self, expr: Option<&'a Expr>) {
        if let Some(expr) = expr {
            self.expr(expr);
        }
    }

    fn exprs(&mut self, exprs: &'a [Expr]) {
        self.0.extend(exprs.iter().map(Node::Expr));
    }

    fn parameters(&mut self, parameters: &'a FunctionParameters) {
        self.exprs(parameters.args());
    }

    fn with(&mut self, with: Option<&'a WithClause>) {
        if let Some(with) = with {
            self.push(Node::With(with));
        }
    }

    fn returning(&mut self, returning: Option<&'a ReturningClause>) {
        if let Some(returning) = returning {
            self.push(Node::Returning(returning));
        }
    }

    fn core(&mut self, core: &'a SelectCore) {
        match core {
            SelectCore::Select(select) => self.push(Node::SelectClause(select)),
            SelectCore::Values(values) => self.push(Node::Values(values)),
        }
    }

    fn boundary(&mut self, boundary: &'a FrameBoundary) {
        self.opt_expr(boundary.offset());
    }
}

impl<'a> Node<'a> {
    /// Returns the source span of the node.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(n) => n.span(),
            Self::Select(n) => n.span,
            Self::Insert(n) => n.span,
            Self::Update(n) => n.span,
            Self::Delete(n) => n.span,
            Self::CreateTable(n) => n.span,
            Self::CreateVirtualTable(n) => n.span,
            Self::CreateView(n) => n.span,
            Self::CreateTrigger(n) => n.span,
            Self::CreateIndex(n) => n.span,
            Self::With(n) => n.span,
            Self::CommonTableExpression(n) => n.span,
            Self::SelectClause(n) => n.span,
            Self::Values(n) => n.span,
            Self::Compound(n) => n.span,
            Self::ResultColumn(n) => n.span(),
            Self::TableRef(n) => n.span(),
            Self::Join(n) => n.span,
            Self::When(n) => n.span,
            Self::OrderBy(n) => n.span,
            Self::OrderingItem(n) => n.span(),
            Self::Limit(n) => n.span,
            Self::Window(n) => n.span,
            Self::NamedWindow(n) => n.span,
            Self::Frame(n) => n.span,
            Self::TypeName(n) => n.span,
            Self::Assignment(n) => n.span,
            Self::Upsert(n) => n.span,
            Self::ConflictTarget(n) => n.span,
            Self::Returning(n) => n.span,
            Self::ColumnDefinition(n) => n.span,
            Self::ColumnConstraint(n) => n.span,
            Self::TableConstraint(n) => n.span,
            Self::ForeignKey(n) => n.span,
            Self::IndexedColumn(n) => n.span,
            Self::RowClass(n) => n.span,
            Self::DriftFile(n) => n.span,
            Self::Import(n) => n.span,
            Self::Declared(n) => n.span,
            Self::StatementParameter(n) => n.span(),
        }
    }

    /// Returns the direct children of the node in source order.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn children(&self) -> Vec<Node<'a>> {
        let mut c = Children(Vec::new());
        match *self {
            Self::Expr(expr) => expr_children(&mut c, expr),
            Self::Select(select) => {
                c.with(select.with.as_ref());
                c.core(&select.core);
                for compound in &select.compounds {
                    c.push(Self::Compound(compound));
                }
                if let Some(order_by) = &select.order_by {
                    c.push(Self::OrderBy(order_by));
                }
                if let Some(limit) = &select.limit {
                    c.push(Self::Limit(limit));
                }
            }
            Self::Insert(insert) => {
                c.with(insert.with.as_ref());
                match &insert.source {
                    InsertSource::Values(values) => c.push(Self::Values(values)),
                    InsertSource::Query(query) => c.push(Self::Select(query)),
                    InsertSource::DefaultValues { .. } | InsertSource::Placeholder { .. } => {}
                }
                for upsert in &insert.upserts {
                    c.push(Self::Upsert(upsert));
                }
                c.returning(insert.returning.as_ref());
            }
            Self::Update(update) => {
                c.with(update.with.as_ref());
                for assignment in &update.assignments {
                    c.push(Self::Assignment(assignment));
                }
                if let Some(from) = &update.from {
                    c.push(Self::TableRef(from));
                }
                c.opt_expr(update.where_clause.as_ref());
                c.returning(update.returning.as_ref());
            }
            Self::Delete(delete) => {
                c.with(delete.with.as_ref());
                c.opt_expr(delete.where_clause.as_ref());
                c.returning(delete.returning.as_ref());
            }
            Self::CreateTable(table) => {
                for column in &table.columns {
                    c.push(Self::ColumnDefinition(column));
                }
                for constraint in &table.constraints {
                    c.push(Self::TableConstraint(constraint));
                }
                if let Some(query) = &table.as_select {
                    c.push(Self::Select(query));
                }
                if let Some(row_class) = &table.row_class {
                    c.push(Self::RowClass(row_class));
                }
            }
            Self::CreateVirtualTable(_)
            | Self::RowClass(_)
            | Self::Import(_)
            | Self::TypeName(_) => {}
            Self::CreateView(view) => {
                if let Some(row_class) = &view.row_class {
                    c.push(Self::RowClass(row_class));
                }
                c.push(Self::Select(&view.query));
            }
            Self::CreateTrigger(trigger) => {
                c.opt_expr(trigger.when.as_ref());
                c.0.extend(trigger.body.iter().map(Node::from));
            }
            Self::CreateIndex(index) => {
                for column in &index.columns {
                    c.push(Self::IndexedColumn(column));
                }
                c.opt_expr(index.where_clause.as_ref());
            }
            Self::With(with) => {
                for cte in &with.ctes {
                    c.push(Self::CommonTableExpression(cte));
                }
            }
            Self::CommonTableExpression(cte) => c.push(Self::Select(&cte.query)),
            Self::SelectClause(select) => {
                for column in &select.columns {
                    c.push(Self::ResultColumn(column));
                }
                if let Some(from) = &select.from {
                    c.push(Self::TableRef(from));
                }
                c.opt_expr(select.where_clause.as_ref());
                c.exprs(&select.group_by);
                c.opt_expr(select.having.as_ref());
                for window in &select.windows {
                    c.push(Self::NamedWindow(window));
                }
            }
            Self::Values(values) => {
                for row in &values.rows {
                    c.exprs(row);
                }
            }
            Self::Compound(compound) => c.core(&compound.core),
            Self::ResultColumn(column) => match column {
                ResultColumn::Expression { expr, .. } => c.expr(expr),
                ResultColumn::NestedQuery { query, .. } => c.push(Self::Select(query)),
                ResultColumn::Star { .. }
                | ResultColumn::TableStar { .. }
                | ResultColumn::NestedStar { .. } => {}
            },
            Self::TableRef(table) => match table {
                TableRef::Table { .. } => {}
                TableRef::Subquery { query, .. } => c.push(Self::Select(query)),
                TableRef::TableFunction { args, .. } => c.exprs(args),
                TableRef::Parenthesized { inner, .. } => c.push(Self::TableRef(inner)),
                TableRef::Join { left, join, .. } => {
                    c.push(Self::TableRef(left));
                    c.push(Self::Join(join));
                }
            },
            Self::Join(join) => {
                c.push(Self::TableRef(&join.table));
                if let Some(JoinConstraint::On(expr)) = &join.constraint {
                    c.expr(expr);
                }
            }
            Self::When(when) => {
                c.expr(&when.when);
                c.expr(&when.then);
            }
            Self::OrderBy(order_by) => {
                for item in &order_by.items {
                    c.push(Self::OrderingItem(item));
                }
            }
            Self::OrderingItem(item) => {
                if let OrderingItem::Term(term) = item {
                    c.expr(&term.expr);
                }
            }
            Self::Limit(limit) => {
                if let LimitKind::Expressions { limit, offset } = &limit.kind {
                    c.expr(limit);
                    c.opt_expr(offset.as_ref());
                }
            }
            Self::Window(window) => {
                c.exprs(&window.partition_by);
                if let Some(order_by) = &window.order_by {
                    c.push(Self::OrderBy(order_by));
                }
                if let Some(frame) = &window.frame {
                    c.push(Self::Frame(frame));
                }
            }
            Self::NamedWindow(window) => c.push(Self::Window(&window.definition)),
            Self::Frame(frame) => {
                c.boundary(&frame.start);
                c.boundary(&frame.end);
            }
            Self::Assignment(assignment) => c.expr(&assignment.value),
            Self::Upsert(upsert) => {
                if let Some(target) = &upsert.target {
                    c.push(Self::ConflictTarget(target));
                }
                if let UpsertAction::Update {
                    assignments,
                    where_clause,
                } = &upsert.action
                {
                    for assignment in assignments {
                        c.push(Self::Assignment(assignment));
                    }
                    c.opt_expr(where_clause.as_ref());
                }
            }
            Self::ConflictTarget(target) => {
                for column in &target.columns {
                    c.push(Self::IndexedColumn(column));
                }
                c.opt_expr(target.where_clause.as_ref());
            }
            Self::Returning(returning) => {
                for column in &returning.columns {
                    c.push(Self::ResultColumn(column));
                }
            }
            Self::ColumnDefinition(column) => {
                if let Some(type_name) = &column.type_name {
                    c.push(Self::TypeName(type_name));
                }
                for constraint in &column.constraints {
                    c.push(Self::ColumnConstraint(constraint));
                }
            }
            Self::ColumnConstraint(constraint) => match &constraint.kind {
                ColumnConstraintKind::Check(expr)
                | ColumnConstraintKind::Default(expr)
                | ColumnConstraintKind::Generated { expr, .. } => c.expr(expr),
                ColumnConstraintKind::ForeignKey(clause) => c.push(Self::ForeignKey(clause)),
                _ => {}
            },
            Self::TableConstraint(constraint) => match &constraint.kind {
                TableConstraintKind::PrimaryKey { columns, .. }
                | TableConstraintKind::Unique { columns, .. } => {
                    for column in columns {
                        c.push(Self::IndexedColumn(column));
                    }
                }
                TableConstraintKind::Check(expr) => c.expr(expr),
                TableConstraintKind::ForeignKey { clause, .. } => c.push(Self::ForeignKey(clause)),
            },
            Self::ForeignKey(_) => {}
            Self::IndexedColumn(column) => c.expr(&column.expr),
            Self::DriftFile(file) => {
                for statement in &file.statements {
                    match statement {
                        DriftStatement::Import(import) => c.push(Self::Import(import)),
                        DriftStatement::Declared(declared) => c.push(Self::Declared(declared)),
                        DriftStatement::OnCreate { statement, .. }
                        | DriftStatement::Plain(statement) => c.push(Node::from(statement)),
                    }
                }
            }
            Self::Declared(declared) => {
                for parameter in &declared.parameters {
                    c.push(Self::StatementParameter(parameter));
                }
                c.push(Node::from(&declared.statement));
            }
            Self::StatementParameter(parameter) => match parameter {
                StatementParameter::VariableType { type_name, .. } => {
                    if let Some(type_name) = type_name {
                        c.push(Self::TypeName(type_name));
                    }
                }
                StatementParameter::DefaultValue { default, .. } => c.expr(default),
            },
        }
        c.0
    }

    /// Visits this node and all of its descendants in pre-order.
    pub fn walk(&self, visit: &mut impl FnMut(Node<'a>)) {
        visit(*self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

fn expr_children<'a>(c: &mut Children<'a>, expr: &'a Expr) {
    match expr {
        Expr::Literal { .. }
        | Expr::Reference { .. }
        | Expr::Variable { .. }
        | Expr::Placeholder { .. } => {}
        Expr::Unary { operand, .. } => c.expr(operand),
        Expr::Binary { left, right, .. } => {
            c.expr(left);
            c.expr(right);
        }
        Expr::Collate { expr, .. }
        | Expr::IsNull { expr, .. }
        | Expr::Parentheses { expr, .. } => c.expr(expr),
        Expr::Cast {
            expr, type_name, ..
        } => {
            c.expr(expr);
            c.push(Node::TypeName(type_name));
        }
        Expr::Like {
            expr,
            pattern,
            escape,
            ..
        } => {
            c.expr(expr);
            c.expr(pattern);
            c.opt_expr(escape.as_deref());
        }
        Expr::In { expr, source, .. } => {
            c.expr(expr);
            match source {
                InSource::List(items) => c.exprs(items),
                InSource::Subquery(query) => c.push(Node::Select(query)),
                InSource::Table { .. } => {}
                InSource::Variable(variable) => c.expr(variable),
            }
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            c.expr(expr);
            c.expr(low);
            c.expr(high);
        }
        Expr::Case {
            operand,
            whens,
            else_clause,
            ..
        } => {
            c.opt_expr(operand.as_deref());
            for when in whens {
                c.push(Node::When(when));
            }
            c.opt_expr(else_clause.as_deref());
        }
        Expr::Exists { query, .. } | Expr::Subquery { query, .. } => {
            c.push(Node::Select(query));
        }
        Expr::Tuple { items, .. } => c.exprs(items),
        Expr::Function { parameters, .. } => c.parameters(parameters),
        Expr::AggregateFunction {
            parameters,
            order_by,
            filter,
            ..
        } => {
            c.parameters(parameters);
            if let Some(order_by) = order_by {
                c.push(Node::OrderBy(order_by));
            }
            c.opt_expr(filter.as_deref());
        }
        Expr::WindowFunction {
            parameters,
            filter,
            over,
            ..
        } => {
            c.parameters(parameters);
            c.opt_expr(filter.as_deref());
            if let Over::Window(window) = over {
                c.push(Node::Window(window));
            }
        }
        Expr::Raise { message, .. } => c.opt_expr(message.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Literal};

    fn int(value: i64, start: usize) -> Expr {
        Expr::Literal {
            value: Literal::Integer(value),
            span: Span::new(start, start + 1),
        }
    }

    #[test]
    fn test_walk_is_pre_order() {
        // 1 + 2
        let expr = Expr::Binary {
            left: Box::new(int(1, 0)),
            op: BinaryOp::Add,
            right: Box::new(int(2, 4)),
            span: Span::new(0, 5),
        };
        let mut spans = Vec::new();
        Node::from(&expr).walk(&mut |node| spans.push(node.span()));
        assert_eq!(spans, vec![Span::new(0, 5), Span::new(0, 1), Span::new(4, 5)]);
    }

    #[test]
    fn test_leaf_has_no_children() {
        let expr = int(7, 0);
        assert!(Node::from(&expr).children().is_empty());
    }
}
