// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// PATH_ENCODE_SET is the encode set for WebHDFS remote paths.
///
/// Alphanumeric characters and `- _ . ~ /` pass through unescaped; every
/// other byte is escaped as `%XX` uppercase hex. `?` is escaped like any
/// other byte, so a path can never reintroduce query syntax.
static PATH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// percent_encode_path will do percent encoding for a remote path.
pub(crate) fn percent_encode_path(path: &str) -> String {
    utf8_percent_encode(path, &PATH_ENCODE_SET).to_string()
}

/// Builds fully qualified request URLs for WebHDFS operations.
///
/// The shape is
/// `http://{host}:{port}/webhdfs/v1{path}?[user.name={user}&]op={OP}{fragment}`;
/// the `user.name` parameter appears only when a user was configured, its
/// absence signals anonymous access.
pub(crate) struct UrlBuilder {
    prefix: String,
    user: Option<String>,
}

impl UrlBuilder {
    pub fn new(host: &str, port: u16, user: Option<&str>) -> Self {
        Self {
            prefix: format!("http://{host}:{port}/webhdfs/v1"),
            user: user.map(|u| u.to_string()),
        }
    }

    /// Build the URL for `operation` on `remote_path`.
    pub fn url(&self, remote_path: &str, operation: &str) -> String {
        let mut url = format!("{}{}", self.prefix, percent_encode_path(remote_path));
        match &self.user {
            Some(user) => url.push_str(&format!("?user.name={user}&op={operation}")),
            None => url.push_str(&format!("?op={operation}")),
        }
        url
    }

    /// Build the URL for `operation` on `remote_path` with extra query
    /// parameters appended. `fragment` is either empty or a sequence of
    /// `&name=value` pairs.
    pub fn url_with(&self, remote_path: &str, operation: &str, fragment: &str) -> String {
        let mut url = self.url(remote_path, operation);
        url.push_str(fragment);
        url
    }
}

#[cfg(test)]
mod tests {
    use percent_encoding::percent_decode_str;

    use super::*;

    #[test]
    fn test_percent_encode_path() {
        let cases = vec![
            (
                "Reserved Characters",
                ";,/?:@&=+$",
                "%3B%2C/%3F%3A%40%26%3D%2B%24",
            ),
            ("Exempt Characters", "-_.~/", "-_.~/"),
            ("Number Sign", "#", "%23"),
            (
                "Alphanumeric Characters + Space",
                "ABC abc 123",
                "ABC%20abc%20123",
            ),
            (
                "Unicode",
                "你好，世界！❤",
                "%E4%BD%A0%E5%A5%BD%EF%BC%8C%E4%B8%96%E7%95%8C%EF%BC%81%E2%9D%A4",
            ),
        ];

        for (name, input, expected) in cases {
            let actual = percent_encode_path(input);

            assert_eq!(actual, expected, "{name}");
        }
    }

    #[test]
    fn test_percent_encode_round_trip() {
        let cases = vec![
            "/plain/path/file.txt",
            "/with space/and?query&chars=1",
            "/reserved/;,:@&=+$#",
            "/你好/世界",
        ];

        for input in cases {
            let encoded = percent_encode_path(input);
            let decoded = percent_decode_str(&encoded)
                .decode_utf8()
                .expect("must decode");
            assert_eq!(decoded, input);
        }
    }

    #[test]
    fn test_url_with_user() {
        let builder = UrlBuilder::new("namenode", 50070, Some("hdfs"));
        assert_eq!(
            builder.url("/tmp/a.txt", "OPEN"),
            "http://namenode:50070/webhdfs/v1/tmp/a.txt?user.name=hdfs&op=OPEN"
        );
    }

    #[test]
    fn test_url_anonymous() {
        let builder = UrlBuilder::new("namenode", 50070, None);
        assert_eq!(
            builder.url("/tmp/a.txt", "LISTSTATUS"),
            "http://namenode:50070/webhdfs/v1/tmp/a.txt?op=LISTSTATUS"
        );
    }

    #[test]
    fn test_url_with_fragment() {
        let builder = UrlBuilder::new("namenode", 9870, None);
        assert_eq!(
            builder.url_with("/tmp/a dir", "MKDIRS", "&permission=755"),
            "http://namenode:9870/webhdfs/v1/tmp/a%20dir?op=MKDIRS&permission=755"
        );
    }

    #[test]
    fn test_question_mark_in_path_is_escaped() {
        let builder = UrlBuilder::new("namenode", 50070, None);
        let url = builder.url("/tmp/what?.txt", "DELETE");
        assert_eq!(
            url,
            "http://namenode:50070/webhdfs/v1/tmp/what%3F.txt?op=DELETE"
        );
    }
}
