//! Built-in license texts.

pub const APACHE: &str = r#"Copyright{{ if .Year }} {{.Year}}{{ end }} {{.Holder}}

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

     http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License."#;

pub const BSD: &str = r#"Copyright (c){{ if .Year }} {{.Year}}{{ end }} {{.Holder}} All rights reserved.
Use of this source code is governed by a BSD-style
license that can be found in the LICENSE file."#;

pub const MIT: &str = r#"Copyright (c){{ if .Year }} {{.Year}}{{ end }} {{.Holder}}

Permission is hereby granted, free of charge, to any person obtaining a copy of
this software and associated documentation files (the "Software"), to deal in
the Software without restriction, including without limitation the rights to
use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
the Software, and to permit persons to whom the Software is furnished to do so,
subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE."#;

pub const MPL: &str = r#"This Source Code Form is subject to the terms of the Mozilla Public
License, v. 2.0. If a copy of the MPL was not distributed with this
file, You can obtain one at https://mozilla.org/MPL/2.0/."#;

/// Appended to the license body when SPDX identifiers are requested.
pub const SPDX_SUFFIX: &str = "\n\nSPDX-License-Identifier: {{.SPDXID}}";

/// Used instead of the license body in SPDX-only mode.
pub const SPDX_ONLY: &str = "{{ if and .Year .Holder }}Copyright {{.Year}} {{.Holder}}\n{{ end }}SPDX-License-Identifier: {{.SPDXID}}";

/// Looks up a built-in license by name, ignoring case.
pub fn lookup(name: &str) -> Option<&'static str> {
  match name.to_lowercase().as_str() {
    "apache" | "apache-2.0" => Some(APACHE),
    "bsd" => Some(BSD),
    "mit" => Some(MIT),
    "mpl" | "mpl-2.0" => Some(MPL),
    _ => None,
  }
}
