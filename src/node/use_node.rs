// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgvalues::Length;
use tiny_skia::{Path, Transform};

use crate::attributes::{AId, AttributeValue};
use crate::context::{RenderContext, ResolveContext};
use crate::units::{LengthContext, LengthType};
use crate::OptionLog;

/// A `use` element.
#[allow(missing_docs)]
#[derive(Clone, Default, Debug)]
pub struct Use {
    pub href: Option<String>,
    pub x: Length,
    pub y: Length,
}

impl Use {
    pub(crate) fn set_attribute(
        &mut self,
        aid: AId,
        value: AttributeValue,
    ) -> Result<(), AttributeValue> {
        match (aid, value) {
            (AId::Href, AttributeValue::Link(v)) => self.href = Some(v),
            (AId::X, AttributeValue::Length(v)) => self.x = v,
            (AId::Y, AttributeValue::Length(v)) => self.y = v,
            (_, value) => return Err(value),
        }

        Ok(())
    }

    fn offset(&self, ctx: &LengthContext) -> Transform {
        let x = ctx.resolve(self.x, LengthType::Horizontal);
        let y = ctx.resolve(self.y, LengthType::Vertical);
        Transform::from_translate(x as f32, y as f32)
    }

    pub(crate) fn prepare(&self, ctx: &mut RenderContext) {
        let ts = self.offset(ctx.length());
        ctx.concat(ts);
    }

    pub(crate) fn render(&self, ctx: &mut RenderContext) {
        let href = match self.href {
            Some(ref v) => v,
            None => return,
        };

        let target = match ctx
            .find_node_by_id(href)
            .log_none(|| log::warn!("'use' references a missing element '{}'.", href))
        {
            Some(v) => v,
            None => return,
        };

        if ctx.enter(&target) {
            target.render(ctx);
        }
    }

    /// Returns the target geometry without the `x`/`y` offset.
    pub(crate) fn target_path(&self, ctx: &ResolveContext) -> Option<Path> {
        let target = ctx.find_node_by_id(self.href.as_deref()?)?;
        let ctx = ctx.enter(&target)?;
        target.as_path(&ctx)
    }

    pub(crate) fn content_path(&self, ctx: &ResolveContext) -> Option<Path> {
        let path = self.target_path(ctx)?;

        let ts = self.offset(ctx.length());
        if ts.is_identity() {
            Some(path)
        } else {
            path.transform(ts)
        }
    }
}
